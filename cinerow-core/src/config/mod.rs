//! Provider credentials, endpoints and controller timings.

pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AssetConfig, CatalogConfig, OmdbConfig, TimingConfig, TmdbConfig,
};
