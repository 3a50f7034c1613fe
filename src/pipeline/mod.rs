// src/pipeline/mod.rs
//! Scope and granularity transforms over a report's module list.
//!
//! Filtering always runs before collapsing: a start directory first re-roots
//! the graph, then depth or pattern consolidation applies to the re-rooted
//! paths. The result is always sorted by source.

pub mod consolidate;
pub mod filter;
pub mod scope;

pub use consolidate::{consolidate_by_depth, consolidate_by_pattern, depth_pattern};
pub use filter::filter;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::report::Module;

/// How modules are collapsed after filtering.
#[derive(Debug, Clone, Default)]
pub enum Collapse {
    #[default]
    None,
    /// Keep the first `n` path segments.
    Depth(usize),
    /// Keep the first match of an explicit pattern.
    Pattern(Regex),
}

impl Collapse {
    /// Picks the explicit pattern when given, otherwise the depth cutoff.
    ///
    /// # Errors
    /// Returns error if `pattern` is not a valid regex.
    pub fn from_parts(depth: usize, pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(p) if !p.is_empty() => Ok(Self::Pattern(Regex::new(p)?)),
            _ if depth > 0 => Ok(Self::Depth(depth)),
            _ => Ok(Self::None),
        }
    }
}

/// User-chosen view over the report.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub start_dir: String,
    pub collapse: Collapse,
}

impl ViewOptions {
    #[must_use]
    pub fn new(start_dir: impl Into<String>, collapse: Collapse) -> Self {
        Self {
            start_dir: start_dir.into(),
            collapse,
        }
    }
}

/// Runs filter, then collapse, then the final sort.
///
/// # Errors
/// Returns error if a depth pattern cannot be built.
pub fn optimize(modules: &[Module], options: &ViewOptions) -> Result<Vec<Module>> {
    let scoped = filter(modules, &options.start_dir);
    debug!(
        start_dir = %options.start_dir,
        before = modules.len(),
        after = scoped.len(),
        "filtered modules"
    );

    let mut collapsed = match &options.collapse {
        Collapse::None => scoped,
        Collapse::Depth(depth) => consolidate_by_depth(&scoped, *depth)?,
        Collapse::Pattern(pattern) => consolidate_by_pattern(&scoped, pattern),
    };

    sort_by_source(&mut collapsed);
    Ok(collapsed)
}

/// Stable ascending sort by source path.
pub fn sort_by_source(modules: &mut [Module]) {
    modules.sort_by(|a, b| a.source.cmp(&b.source));
}
