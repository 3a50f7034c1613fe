// src/config/types.rs
use serde::{Deserialize, Serialize};

use crate::theme::ThemeSpec;

/// Which part of the report to show, and how coarsely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Subtree to show. Empty means the whole report.
    pub start_dir: String,
    /// Collapse paths to this many segments. 0 disables.
    pub depth: usize,
    /// Explicit collapse pattern; takes precedence over `depth`.
    pub collapse_pattern: Option<String>,
    /// Prefix for per-module links, e.g. a repository browse URL.
    pub base_url: Option<String>,
}

/// On-disk shape of `cruisegraph.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CruiseToml {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub theme: ThemeSpec,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub view: ViewConfig,
    pub theme: ThemeSpec,
}
