//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use docshim_config::Config;
use ortho_config::{OrthoConfig, OrthoError};

use crate::bootstrap::ConfigLoader;

/// Loader that returns a fixed configuration.
pub struct TestConfigLoader {
    config: Config,
}

impl TestConfigLoader {
    /// Loader yielding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Loader yielding `config`.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("docshim"),
            OsString::from("--max-bson-object-size-bytes"),
            OsString::from("sixteen-megabytes"),
        ];
        Config::load_from_iter(args)
    }
}
