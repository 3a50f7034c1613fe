// src/pipeline/filter.rs
//! Restricts a module graph to the subtree under a start directory.

use crate::report::{Dependency, Module};

/// Keeps modules under `start_dir`, re-rooted so the prefix disappears.
///
/// Modules outside the subtree are dropped whole. Dependencies pointing outside
/// it are dropped one by one; their owning module survives.
#[must_use]
pub fn filter(modules: &[Module], start_dir: &str) -> Vec<Module> {
    if start_dir.is_empty() {
        return modules.to_vec();
    }

    let prefix = format!("{start_dir}/");
    modules
        .iter()
        .filter_map(|module| {
            let source = module.source.strip_prefix(&prefix)?;
            Some(Module {
                source: source.to_string(),
                dependencies: filter_dependencies(&module.dependencies, &prefix),
                ..module.clone()
            })
        })
        .collect()
}

fn filter_dependencies(dependencies: &[Dependency], prefix: &str) -> Vec<Dependency> {
    dependencies
        .iter()
        .filter_map(|dep| {
            let resolved = dep.resolved.strip_prefix(prefix)?;
            Some(Dependency {
                resolved: resolved.to_string(),
                ..dep.clone()
            })
        })
        .collect()
}
