// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, CruiseToml, ViewConfig};

use std::path::Path;

use crate::dot::EmitOptions;
use crate::error::Result;
use crate::pipeline::{Collapse, ViewOptions};
use crate::theme::Theme;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and loads `cruisegraph.toml` from the working directory.
    ///
    /// # Errors
    /// Returns error if a config file exists but is malformed.
    pub fn load() -> Result<Self> {
        let mut config = Self::new();
        io::load_local_config(&mut config, Path::new("."))?;
        Ok(config)
    }

    /// Creates a config from an explicit file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        io::load_toml_config(&mut config, path)?;
        Ok(config)
    }

    /// # Errors
    /// Returns error if `content` is not valid config TOML.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::parse_toml(self, content)
    }

    /// Pipeline options for the configured view.
    ///
    /// # Errors
    /// Returns error if the collapse pattern is not a valid regex.
    pub fn view_options(&self) -> Result<ViewOptions> {
        let collapse = Collapse::from_parts(self.view.depth, self.view.collapse_pattern.as_deref())?;
        Ok(ViewOptions::new(self.view.start_dir.clone(), collapse))
    }

    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            base_url: self.view.base_url.clone(),
            start_dir: self.view.start_dir.clone(),
        }
    }

    /// Built-in theme with the configured overrides applied.
    ///
    /// # Errors
    /// Returns error if a theme criterion is an invalid pattern.
    pub fn theme(&self) -> Result<Theme> {
        Theme::builtin()?.with_overrides(&self.theme)
    }
}
