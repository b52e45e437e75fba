//! Configuration for cfgstore
//!
//! Controls how the writer stages and persists rewrites.

use std::path::PathBuf;

/// Settings shared by a [`Store`](crate::Store) and the file writer
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Staging Configuration
    // -------------------------------------------------------------------------
    /// Directory where rewrite staging files are created
    pub temp_dir: PathBuf,

    /// Staging file name prefix; files are named `{prefix}.temp_conf.XXXXXX`
    pub temp_prefix: String,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: whether rewrites are fsynced before returning
    pub sync_strategy: SyncStrategy,
}

/// Sync strategy for rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the staged file and the destination on every write (safest)
    EveryWrite,

    /// Leave flushing to the OS (tests and benchmarks)
    OsManaged,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            temp_prefix: "cfgstore".to_string(),
            sync_strategy: SyncStrategy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub(crate) fn should_sync(&self) -> bool {
        self.sync_strategy == SyncStrategy::EveryWrite
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the staging directory
    pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = path.into();
        self
    }

    /// Set the staging file name prefix
    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.temp_prefix = prefix.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
