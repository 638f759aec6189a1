//! Base layer of every config build: the serialized built-in defaults.

use crate::config::TermfolioConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with [`TermfolioConfig::default`], so later sources only
/// need to name the keys they override.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&TermfolioConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
