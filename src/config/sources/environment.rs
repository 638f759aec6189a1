//! Environment variable source: TERMFOLIO__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `TERMFOLIO__SHELL__PROMPT` maps to `shell.prompt`. The single-underscore
/// `TERMFOLIO_LOG*` variables belong to the logging layer and are not read here.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TERMFOLIO")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
