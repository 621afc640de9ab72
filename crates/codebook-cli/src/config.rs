//! Configuration file loading for the codebook CLI.

use std::fs;

use log::info;

use codebook::{CodebookError, RunConfig};

/// Loads run defaults from a TOML file, or the built-in defaults when no
/// file was given.
pub fn load_config(path: Option<&String>) -> Result<RunConfig, CodebookError> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    info!(config_path = path.as_str(); "Loading configuration");
    let text = fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|err| CodebookError::Config(err.to_string()))
}
