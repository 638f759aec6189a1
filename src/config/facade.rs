//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TermfolioConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, the global file, an optional
    /// explicit file, and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<TermfolioConfig, ConfigError> {
        MergeService::load(explicit)
    }
}
