//! Content factory for loading reward content from a data directory.

use std::path::{Path, PathBuf};

use reward_core::GameConfig;

use crate::loaders::{
    CatalogLoader, ConfigLoader, LoadResult, ObjectDefinition, Scenario, ScenarioLoader,
};

/// Content factory that loads all reward content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── scenario.ron
/// └── catalogs/
///     ├── objects.ron
///     └── shrines.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults when the
    /// file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the scenario from `scenario.ron`.
    pub fn load_scenario(&self) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenario.ron");
        ScenarioLoader::load(&path)
    }

    /// Load a single catalog from `catalogs/{name}.ron`.
    pub fn load_catalog(&self, name: &str) -> LoadResult<Vec<ObjectDefinition>> {
        let path = self.catalogs_dir().join(format!("{}.ron", name));
        CatalogLoader::load(&path)
    }

    /// Load every `*.ron` catalog under `catalogs/`, in file name order.
    pub fn load_catalogs(&self) -> LoadResult<Vec<ObjectDefinition>> {
        let dir = self.catalogs_dir();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        paths.sort();

        let mut objects = Vec::new();
        for path in paths {
            objects.extend(CatalogLoader::load(&path)?);
        }
        Ok(objects)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn catalogs_dir(&self) -> PathBuf {
        self.data_dir.join("catalogs")
    }
}
