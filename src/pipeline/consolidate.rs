// src/pipeline/consolidate.rs
//! Collapses modules whose paths squash to the same string.
//!
//! Every module source and dependency target is replaced by the first match of
//! a collapse pattern. Modules that end up sharing a source are merged, then the
//! edges inside each merged module are merged by target and self-loops created
//! by the collapse are dropped.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::report::{merge_rules, Dependency, Module};

/// Collapses modules and dependency targets to their first `pattern` match.
#[must_use]
pub fn consolidate_by_pattern(modules: &[Module], pattern: &Regex) -> Vec<Module> {
    let squashed: Vec<Module> = modules.iter().map(|m| squash_module(m, pattern)).collect();
    let merged: Vec<Module> = merge_modules(squashed)
        .into_iter()
        .map(|mut module| {
            let dependencies = std::mem::take(&mut module.dependencies);
            module.dependencies = merge_dependencies(dependencies)
                .into_iter()
                .filter(|dep| dep.resolved != module.source)
                .collect();
            module
        })
        .collect();

    debug!(
        before = modules.len(),
        after = merged.len(),
        pattern = pattern.as_str(),
        "consolidated modules"
    );
    merged
}

/// Collapses every path to its first `depth` segments. Zero leaves the graph as is.
///
/// # Errors
/// Returns error if the derived pattern exceeds the regex size limit.
pub fn consolidate_by_depth(modules: &[Module], depth: usize) -> Result<Vec<Module>> {
    if depth == 0 {
        return Ok(modules.to_vec());
    }
    let pattern = depth_pattern(depth)?;
    Ok(consolidate_by_pattern(modules, &pattern))
}

/// Pattern matching exactly the first `depth` `/`-separated segments of a path.
///
/// Paths with fewer segments do not match and are left alone.
///
/// # Errors
/// Returns error if the pattern cannot be compiled.
pub fn depth_pattern(depth: usize) -> Result<Regex> {
    let tail = depth.saturating_sub(1);
    Ok(Regex::new(&format!("^[^/]+(?:/[^/]+){{{tail}}}"))?)
}

fn squash(path: &str, pattern: &Regex) -> String {
    pattern
        .find(path)
        .map_or_else(|| path.to_string(), |m| m.as_str().to_string())
}

fn squash_module(module: &Module, pattern: &Regex) -> Module {
    let source = squash(&module.source, pattern);
    let consolidated = module.consolidated || source != module.source;
    let dependencies = module
        .dependencies
        .iter()
        .map(|dep| Dependency {
            resolved: squash(&dep.resolved, pattern),
            ..dep.clone()
        })
        .collect();

    Module {
        source,
        consolidated,
        dependencies,
        rules: module.rules.clone(),
        valid: module.valid,
        orphan: module.orphan,
        extra: module.extra.clone(),
    }
}

/// Merges modules sharing a source. Groups keep the order of first appearance.
fn merge_modules(modules: Vec<Module>) -> Vec<Module> {
    let mut merged: Vec<Module> = Vec::with_capacity(modules.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for module in modules {
        if let Some(base) = index.get(&module.source).and_then(|&i| merged.get_mut(i)) {
            absorb_module(base, module);
        } else {
            index.insert(module.source.clone(), merged.len());
            merged.push(module);
        }
    }
    merged
}

fn absorb_module(base: &mut Module, other: Module) {
    base.dependencies.extend(other.dependencies);
    base.rules = merge_rules(base.rules.take(), other.rules.as_ref());
    base.valid = base.valid && other.valid;
    base.consolidated = base.consolidated || other.consolidated;
    base.orphan = base.orphan && other.orphan;
}

/// Merges dependencies sharing a target. The first occurrence is the base.
fn merge_dependencies(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    let mut merged: Vec<Dependency> = Vec::with_capacity(dependencies.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for dep in dependencies {
        if let Some(base) = index.get(&dep.resolved).and_then(|&i| merged.get_mut(i)) {
            absorb_dependency(base, dep);
        } else {
            index.insert(dep.resolved.clone(), merged.len());
            merged.push(dep);
        }
    }
    merged
}

fn absorb_dependency(base: &mut Dependency, other: Dependency) {
    for kind in other.dependency_types {
        if !base.dependency_types.contains(&kind) {
            base.dependency_types.push(kind);
        }
    }
    base.rules = merge_rules(base.rules.take(), other.rules.as_ref());
    base.valid = base.valid && other.valid;
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)] // Safe in tests with prior assertions
mod tests {
    use super::*;
    use crate::report::{Rule, Severity};

    fn sources(modules: &[Module]) -> Vec<&str> {
        modules.iter().map(|m| m.source.as_str()).collect()
    }

    #[test]
    fn depth_one_collapses_siblings_and_drops_self_loop() {
        let modules = vec![
            Module::new("src/a.ts").depends_on("src/b.ts"),
            Module::new("src/b.ts"),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();

        assert_eq!(sources(&result), ["src"]);
        assert!(result[0].consolidated);
        assert!(result[0].dependencies.is_empty());
    }

    #[test]
    fn depth_zero_is_identity() {
        let modules = vec![Module::new("src/a.ts").depends_on("src/b.ts")];
        assert_eq!(consolidate_by_depth(&modules, 0).unwrap(), modules);
    }

    #[test]
    fn depth_pattern_takes_exact_segment_count() {
        let pattern = depth_pattern(2).unwrap();
        assert_eq!(
            pattern.find("src/components/x.ts").map(|m| m.as_str()),
            Some("src/components")
        );
        assert!(pattern.find("main.ts").is_none());
    }

    #[test]
    fn shallow_paths_are_not_marked_consolidated() {
        let modules = vec![Module::new("src/a.ts"), Module::new("main.ts")];
        let result = consolidate_by_depth(&modules, 2).unwrap();
        assert!(result.iter().all(|m| !m.consolidated));
        assert_eq!(sources(&result), ["src/a.ts", "main.ts"]);
    }

    #[test]
    fn unchanged_match_does_not_count_as_consolidation() {
        let pattern = Regex::new("^src/[^/]+").unwrap();
        let result = consolidate_by_pattern(&[Module::new("src/a.ts")], &pattern);
        assert!(!result[0].consolidated);
    }

    #[test]
    fn merged_module_ands_validity_and_ors_consolidation() {
        let modules = vec![
            Module::new("lib/x/a.ts"),
            Module::new("lib/x/b.ts").valid(false),
            Module::new("lib/y").consolidated(true),
            Module::new("lib/y"),
        ];
        let pattern = Regex::new("^lib/[^/]+").unwrap();
        let result = consolidate_by_pattern(&modules, &pattern);

        assert_eq!(sources(&result), ["lib/x", "lib/y"]);
        assert!(!result[0].valid);
        assert!(result[0].consolidated);
        assert!(result[1].valid);
        assert!(result[1].consolidated);
    }

    #[test]
    fn merged_module_is_orphan_only_when_all_parts_are() {
        let modules = vec![
            Module::new("src/a.ts").orphan(true),
            Module::new("src/b.ts").depends_on("lib/x.ts"),
            Module::new("lib/x.ts").orphan(true),
            Module::new("lib/y.ts").orphan(true),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();

        assert_eq!(sources(&result), ["src", "lib"]);
        assert!(!result[0].orphan);
        assert_eq!(result[0].dependencies.len(), 1);
        assert!(result[1].orphan);
    }

    #[test]
    fn duplicate_edges_merge_and_union_their_types() {
        let modules = vec![
            Module::new("app/a.ts")
                .with_dependency(Dependency::new("lib/one.ts").with_types(&["import"])),
            Module::new("app/b.ts").with_dependency(
                Dependency::new("lib/two.ts")
                    .with_types(&["import", "type-only"])
                    .valid(false)
                    .with_rule(Rule::new("no-deep", Severity::Info)),
            ),
            Module::new("app/c.ts").with_dependency(
                Dependency::new("lib/one.ts")
                    .with_types(&["require"])
                    .with_rule(Rule::new("no-cycle", Severity::Error)),
            ),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();

        assert_eq!(sources(&result), ["app"]);
        let deps = &result[0].dependencies;
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].resolved, "lib");
        assert_eq!(deps[0].dependency_types, ["import", "type-only", "require"]);
        assert!(!deps[0].valid);

        let rules = deps[0].rules.as_ref().unwrap();
        assert_eq!(rules[0].name, "no-cycle");
        assert_eq!(rules[1].name, "no-deep");
    }

    #[test]
    fn merged_module_rules_sorted_by_severity() {
        let modules = vec![
            Module::new("pkg/a.ts").with_rule(Rule::new("orphan", Severity::Ignore)),
            Module::new("pkg/b.ts").with_rule(Rule::new("deep", Severity::Info)),
            Module::new("pkg/c.ts").with_rule(Rule::new("cycle", Severity::Error)),
            Module::new("pkg/d.ts").with_rule(Rule::new("dev", Severity::Warn)),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();
        let severities: Vec<_> = result[0]
            .rules
            .as_ref()
            .unwrap()
            .iter()
            .map(|r| r.severity)
            .collect();
        assert_eq!(severities, Severity::ALL);
    }

    #[test]
    fn rules_from_later_modules_are_kept_when_base_has_none() {
        let modules = vec![
            Module::new("pkg/a.ts"),
            Module::new("pkg/b.ts").with_rule(Rule::new("cycle", Severity::Error)),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();
        assert_eq!(result[0].rules.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn pattern_consolidation_is_idempotent() {
        let modules = vec![
            Module::new("src/ui/a.ts").depends_on("src/core/b.ts").depends_on("src/ui/c.ts"),
            Module::new("src/ui/c.ts").depends_on("src/core/b.ts"),
            Module::new("src/core/b.ts").valid(false),
            Module::new("main.ts").depends_on("src/ui/a.ts"),
        ];
        let pattern = Regex::new("^src/[^/]+").unwrap();
        let once = consolidate_by_pattern(&modules, &pattern);
        let twice = consolidate_by_pattern(&once, &pattern);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_merged_module_has_duplicate_targets() {
        let modules = vec![
            Module::new("a/1.ts").depends_on("b/1.ts").depends_on("b/2.ts"),
            Module::new("a/2.ts").depends_on("b/2.ts").depends_on("c/1.ts"),
        ];
        let result = consolidate_by_depth(&modules, 1).unwrap();
        let targets: Vec<_> = result[0].dependencies.iter().map(|d| d.resolved.as_str()).collect();
        assert_eq!(targets, ["b", "c"]);
    }
}
