pub mod clean;
pub mod query;
pub mod stats;
pub mod summary;

use std::path::{Path, PathBuf};
use trawl_core::config::{self, Config};
use trawl_core::dataset::Dataset;
use trawl_core::error::TrawlError;
use trawl_core::store;

/// Settings shared by every command that reads the dataset.
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn new(config_path: Option<&Path>, data: Option<PathBuf>) -> Result<Self, TrawlError> {
        let mut config = match config_path {
            Some(path) => config::load_config(path)?,
            None => Config::default(),
        };
        if data.is_some() {
            config.data.path = data;
        }
        tracing::debug!(data = %config.data_path().display(), "resolved dataset path");
        Ok(Self { config })
    }

    /// The cached dataset. Loaded on first use; a missing snapshot is fatal.
    pub fn dataset(&self) -> Result<&'static Dataset, TrawlError> {
        store::load_from(&self.config.data_path())
    }
}
