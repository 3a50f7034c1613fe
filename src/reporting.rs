//! Console output for pipeline summaries.

use std::collections::BTreeMap;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::report::{count_dependencies, Module, Severity};

/// Before/after figures for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub modules_in: usize,
    pub dependencies_in: usize,
    pub modules_out: usize,
    pub dependencies_out: usize,
    pub consolidated: usize,
    pub invalid_modules: usize,
    pub invalid_dependencies: usize,
    /// Rule hits on modules and dependencies of the shown graph, by severity.
    pub rules: BTreeMap<Severity, usize>,
}

impl GraphStats {
    #[must_use]
    pub fn collect(input: &[Module], output: &[Module]) -> Self {
        let mut rules: BTreeMap<Severity, usize> = BTreeMap::new();
        let module_rules = output.iter().filter_map(|m| m.rules.as_ref());
        let dep_rules = output
            .iter()
            .flat_map(|m| &m.dependencies)
            .filter_map(|d| d.rules.as_ref());
        for rule in module_rules.chain(dep_rules).flatten() {
            *rules.entry(rule.severity).or_default() += 1;
        }

        Self {
            modules_in: input.len(),
            dependencies_in: count_dependencies(input),
            modules_out: output.len(),
            dependencies_out: count_dependencies(output),
            consolidated: output.iter().filter(|m| m.consolidated).count(),
            invalid_modules: output.iter().filter(|m| !m.valid).count(),
            invalid_dependencies: output
                .iter()
                .flat_map(|m| &m.dependencies)
                .filter(|d| !d.valid)
                .count(),
            rules,
        }
    }

    #[must_use]
    pub fn rule_count(&self, severity: Severity) -> usize {
        self.rules.get(&severity).copied().unwrap_or(0)
    }
}

/// Prints a colored summary of a pipeline run.
pub fn print_stats(stats: &GraphStats, scope: &str) {
    let scope = if scope.is_empty() { "(root)" } else { scope };
    println!(
        "\n{} {} | {} → {} modules | {} → {} dependencies",
        "GRAPH".cyan().bold(),
        scope,
        stats.modules_in,
        stats.modules_out.to_string().green(),
        stats.dependencies_in,
        stats.dependencies_out.to_string().green(),
    );

    if stats.consolidated > 0 {
        println!(
            "  {} {} consolidated",
            "▸".yellow(),
            stats.consolidated.to_string().yellow()
        );
    }
    println!(
        "  invalid: {} modules, {} dependencies",
        format_count(stats.invalid_modules),
        format_count(stats.invalid_dependencies),
    );

    for severity in Severity::ALL {
        let count = stats.rule_count(severity);
        if count == 0 {
            continue;
        }
        println!("  {} {count}", paint_severity(severity));
    }
}

fn paint_severity(severity: Severity) -> colored::ColoredString {
    let label = format!("{:>6}", severity.label());
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warn => label.yellow(),
        Severity::Info => label.blue(),
        Severity::Ignore => label.dimmed(),
    }
}

fn format_count(n: usize) -> String {
    if n == 0 {
        n.to_string().green().to_string()
    } else {
        n.to_string().red().to_string()
    }
}

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
