// src/config/io.rs
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{Config, CruiseToml};
use crate::error::{CruiseError, Result};

pub const CONFIG_FILE: &str = "cruisegraph.toml";

/// Loads `cruisegraph.toml` from `dir` when present.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_local_config(config: &mut Config, dir: &Path) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        debug!(path = %path.display(), "no config file");
        return Ok(());
    }
    load_toml_config(config, &path)
}

/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_toml_config(config: &mut Config, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| CruiseError::io(e, path))?;
    parse_toml(config, &content)?;
    debug!(path = %path.display(), "loaded config");
    Ok(())
}

/// # Errors
/// Returns error if `content` is not valid config TOML.
pub fn parse_toml(config: &mut Config, content: &str) -> Result<()> {
    let parsed: CruiseToml = toml::from_str(content)?;
    config.view = parsed.view;
    config.theme = parsed.theme;
    Ok(())
}
