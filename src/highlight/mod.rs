// src/highlight/mod.rs
//! Title-keyed lookup of rendered elements that light up together.
//!
//! Rendered nodes are titled with their module path and edges with
//! `"<from> -> <to>"`. Hovering a node highlights every edge touching it;
//! hovering an edge highlights the edge and both endpoints.

pub mod selection;
pub mod svg;

pub use selection::{Event, Selection};
pub use svg::{ElementKind, SvgElement, SvgElements};

use std::collections::HashMap;

use tracing::{debug, warn};

/// Anything carrying a rendered identity title.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for String {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for &str {
    fn title(&self) -> &str {
        self
    }
}

/// Splits an edge title into its endpoints. Whitespace around the arrow is optional.
#[must_use]
pub fn parse_edge_title(title: &str) -> Option<(&str, &str)> {
    let (from, to) = title.split_once("->")?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// Title to the elements highlighted with it.
#[derive(Debug, Clone)]
pub struct HighlightIndex<E> {
    entries: HashMap<String, Vec<E>>,
}

impl<E> Default for HighlightIndex<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E: Titled + Clone> HighlightIndex<E> {
    /// Indexes one render's nodes and edges.
    ///
    /// Edges with malformed titles are skipped. Edges with an unknown endpoint
    /// still join their endpoints' entries but get no entry of their own.
    #[must_use]
    pub fn build(nodes: &[E], edges: &[E]) -> Self {
        let mut entries: HashMap<String, Vec<E>> = HashMap::new();
        let mut by_title: HashMap<&str, &E> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            entries.insert(node.title().to_string(), vec![node.clone()]);
            by_title.insert(node.title(), node);
        }

        let mut skipped = 0usize;
        for edge in edges {
            let title = edge.title();
            let Some((from, to)) = parse_edge_title(title) else {
                skipped += 1;
                continue;
            };

            if let (Some(&from_node), Some(&to_node)) = (by_title.get(from), by_title.get(to)) {
                entries.insert(
                    title.to_string(),
                    vec![edge.clone(), from_node.clone(), to_node.clone()],
                );
            }

            entries.entry(from.to_string()).or_default().push(edge.clone());
            entries.entry(to.to_string()).or_default().push(edge.clone());
        }

        if skipped > 0 {
            warn!(skipped, "edge titles without an arrow were not indexed");
        }
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            entries = entries.len(),
            "built highlight index"
        );
        Self { entries }
    }
}

impl<E> HighlightIndex<E> {
    /// Elements to highlight for `title`; empty when unknown.
    #[must_use]
    pub fn get(&self, title: &str) -> &[E] {
        self.entries.get(title).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles<'a>(elements: &'a [&'a str]) -> Vec<&'a str> {
        elements.to_vec()
    }

    #[test]
    fn node_and_edge_entries_are_symmetric() {
        let nodes = ["A", "B"];
        let edges = ["A -> B"];
        let index = HighlightIndex::build(&nodes, &edges);

        assert_eq!(titles(index.get("A")), ["A", "A -> B"]);
        assert_eq!(titles(index.get("B")), ["B", "A -> B"]);
        assert_eq!(titles(index.get("A -> B")), ["A -> B", "A", "B"]);
    }

    #[test]
    fn arrow_without_spaces_is_accepted() {
        let index = HighlightIndex::build(&["src/a.ts", "src/b.ts"], &["src/a.ts->src/b.ts"]);
        assert_eq!(index.get("src/a.ts->src/b.ts").len(), 3);
    }

    #[test]
    fn malformed_edge_titles_are_skipped() {
        let index = HighlightIndex::build(&["A"], &["A to B", "-> B", ""]);
        assert_eq!(titles(index.get("A")), ["A"]);
        assert!(!index.contains("B"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn unknown_endpoint_omits_only_the_edge_entry() {
        let index = HighlightIndex::build(&["A"], &["A -> ghost"]);
        assert!(!index.contains("A -> ghost"));
        assert_eq!(titles(index.get("A")), ["A", "A -> ghost"]);
        assert_eq!(titles(index.get("ghost")), ["A -> ghost"]);
    }

    #[test]
    fn node_collects_every_touching_edge() {
        let nodes = ["A", "B", "C"];
        let edges = ["A -> B", "C -> A", "B -> C"];
        let index = HighlightIndex::build(&nodes, &edges);
        assert_eq!(titles(index.get("A")), ["A", "A -> B", "C -> A"]);
        assert_eq!(titles(index.get("C")), ["C", "C -> A", "B -> C"]);
    }

    #[test]
    fn unknown_title_is_empty() {
        let index: HighlightIndex<String> = HighlightIndex::default();
        assert!(index.get("anything").is_empty());
        assert!(index.is_empty());
    }
}
