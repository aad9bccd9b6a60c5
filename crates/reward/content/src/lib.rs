//! Data-driven reward content and loaders.
//!
//! This crate reads the files a host needs to set up reward objects:
//! - Object catalogs with randomized reward templates (RON)
//! - Scenarios with players, heroes, placed objects and scripted visits (RON)
//! - Game configuration (TOML)
//!
//! All loaders deserialize `reward-core` types directly through its `serde`
//! feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, ObjectCatalog, ObjectDefinition, ObjectPlacement,
    Scenario, ScenarioLoader, ScriptedVisit,
};
