// src/dot/mod.rs
//! Graphviz DOT output for a consolidated module graph.
//!
//! Module paths nest into `cluster_<path>` subgraphs, one per directory, and
//! every module becomes a leaf node whose id is its full source path. Edges are
//! written after all nodes, in module order, each module's dependencies in the
//! order they appear.

pub mod tree;

use std::fmt::Write;

use tracing::debug;

use crate::error::Result;
use crate::pipeline::scope::CLUSTER_PREFIX;
use crate::report::{count_dependencies, Dependency, Module};
use crate::theme::{Attributes, Theme};

use tree::PathNode;

pub const GRAPH_NAME: &str = "dependency-cruiser output";
/// Node shape marking a module that stands for several merged ones.
pub const CONSOLIDATED_SHAPE: &str = "box3d";

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Base for per-module `URL` attributes. No links when absent.
    pub base_url: Option<String>,
    /// Start directory the modules were re-rooted from; restores the real
    /// repository path in links.
    pub start_dir: String,
}

/// Renders modules as a strict digraph styled by `theme`.
///
/// # Errors
/// Returns error if writing to the output buffer fails.
pub fn emit(modules: &[Module], theme: &Theme, options: &EmitOptions) -> Result<String> {
    let mut out = String::with_capacity(modules.len() * 160 + 400);

    writeln!(out, "strict digraph {} {{", quote(GRAPH_NAME))?;
    write_defaults(&mut out, theme)?;
    out.push('\n');

    let root = tree::build(modules);
    for child in &root.children {
        write_path_node(&mut out, child, theme, options, 1)?;
    }

    for module in modules {
        for dep in &module.dependencies {
            write_edge(&mut out, module, dep, theme)?;
        }
    }

    out.push_str("}\n");
    debug!(
        modules = modules.len(),
        edges = count_dependencies(modules),
        bytes = out.len(),
        "emitted dot"
    );
    Ok(out)
}

fn write_defaults(out: &mut String, theme: &Theme) -> Result<()> {
    if !theme.graph.is_empty() {
        writeln!(out, "  {}", attribute_list(&theme.graph))?;
    }
    if !theme.node.is_empty() {
        writeln!(out, "  node [{}]", attribute_list(&theme.node))?;
    }
    if !theme.edge.is_empty() {
        writeln!(out, "  edge [{}]", attribute_list(&theme.edge))?;
    }
    Ok(())
}

fn write_path_node(
    out: &mut String,
    node: &PathNode<'_>,
    theme: &Theme,
    options: &EmitOptions,
    level: usize,
) -> Result<()> {
    let indent = "  ".repeat(level);

    if let Some(module) = node.module {
        let attrs = node_attributes(module, &node.segment, theme, options);
        writeln!(out, "{indent}{} [{}]", quote(&module.source), attribute_list(&attrs))?;
    }

    if node.is_cluster() {
        let id = format!("{CLUSTER_PREFIX}{}", node.path);
        writeln!(out, "{indent}subgraph {} {{", quote(&id))?;
        writeln!(out, "{indent}  label={}", quote(&node.segment))?;
        for child in &node.children {
            write_path_node(out, child, theme, options, level + 1)?;
        }
        writeln!(out, "{indent}}}")?;
    }
    Ok(())
}

/// Theme attributes plus label, tooltip, link and the consolidation marker.
#[must_use]
pub fn node_attributes(
    module: &Module,
    segment: &str,
    theme: &Theme,
    options: &EmitOptions,
) -> Attributes {
    let mut attrs = theme.module_attributes(module);
    attrs.insert("label".to_string(), segment.to_string());
    attrs.insert("tooltip".to_string(), segment.to_string());
    if module.consolidated {
        attrs.insert("shape".to_string(), CONSOLIDATED_SHAPE.to_string());
    }
    if let Some(base) = &options.base_url {
        attrs.insert(
            "URL".to_string(),
            module_url(base, &options.start_dir, &module.source),
        );
    }
    attrs
}

/// Theme attributes plus the leading rule's name, if any.
#[must_use]
pub fn edge_attributes(dependency: &Dependency, theme: &Theme) -> Attributes {
    let mut attrs = theme.dependency_attributes(dependency);
    if let Some(rule) = dependency.first_rule() {
        attrs.insert("xlabel".to_string(), rule.name.clone());
        attrs.insert("tooltip".to_string(), rule.name.clone());
    }
    attrs
}

fn write_edge(out: &mut String, module: &Module, dep: &Dependency, theme: &Theme) -> Result<()> {
    let attrs = edge_attributes(dep, theme);
    write!(out, "  {} -> {}", quote(&module.source), quote(&dep.resolved))?;
    if !attrs.is_empty() {
        write!(out, " [{}]", attribute_list(&attrs))?;
    }
    out.push('\n');
    Ok(())
}

/// Joins `base`, the start directory and a module path with single slashes.
#[must_use]
pub fn module_url(base: &str, start_dir: &str, source: &str) -> String {
    [base.trim_end_matches('/'), start_dir.trim_matches('/'), source.trim_start_matches('/')]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn attribute_list(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={}", quote(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Double-quoted DOT string.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
