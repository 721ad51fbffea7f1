//! Panel configuration
//!
//! Configuration types with built-in defaults, plus a parser for the small
//! TOML subset used by `panel.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;

/// Parse and validate a configuration file
pub fn load(input: &str) -> Result<PanelConfig, ConfigError> {
    let config = parse_config(input)?;
    config.validate()?;
    Ok(config)
}
