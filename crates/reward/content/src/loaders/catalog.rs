//! Rewardable object catalog loader.

use std::path::Path;

use reward_core::{ConfigurationTemplate, GameError, ObjectCapabilities, ObjectTypeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// One kind of rewardable object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    /// Name scenarios use to place the object.
    pub name: String,
    pub type_id: ObjectTypeId,
    #[serde(default)]
    pub capabilities: ObjectCapabilities,
    pub template: ConfigurationTemplate,
}

/// Object catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectCatalog {
    pub objects: Vec<ObjectDefinition>,
}

impl ObjectCatalog {
    pub fn get(&self, name: &str) -> Option<&ObjectDefinition> {
        self.objects.iter().find(|object| object.name == name)
    }
}

/// Loader for object catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate an object catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an ObjectCatalog
    ///
    /// # Returns
    ///
    /// Returns the object definitions in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<ObjectDefinition>> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        debug!(path = %path.display(), objects = catalog.objects.len(), "loaded object catalog");
        Ok(catalog.objects)
    }

    /// Parse and validate catalog text.
    pub fn parse(content: &str) -> LoadResult<ObjectCatalog> {
        let catalog: ObjectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse object catalog RON: {}", e))?;

        for object in &catalog.objects {
            object.template.validate().map_err(|e| {
                anyhow::anyhow!(
                    "Invalid template for object '{}': {} [{}]",
                    object.name,
                    e,
                    e.error_code()
                )
            })?;
        }
        if let Some(name) = duplicate_name(&catalog.objects) {
            anyhow::bail!("Object '{}' is defined more than once", name);
        }

        Ok(catalog)
    }
}

fn duplicate_name(objects: &[ObjectDefinition]) -> Option<&str> {
    objects.iter().enumerate().find_map(|(index, object)| {
        objects[..index]
            .iter()
            .any(|earlier| earlier.name == object.name)
            .then_some(object.name.as_str())
    })
}
