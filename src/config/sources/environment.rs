//! Environment variable source: PARLANCE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `PARLANCE__EVALUATOR__MAX_DEPTH=16` sets `evaluator.max_depth`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("PARLANCE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
