// src/highlight/svg.rs
//! Titled elements from Graphviz SVG output.
//!
//! Graphviz writes every node, edge and cluster as
//! `<g id=".." class="node|edge|cluster"><title>..</title>`, with XML entities
//! in the title (`src&#45;&gt;dst`).

use regex::{Captures, Regex};

use super::{HighlightIndex, Titled};
use crate::error::Result;

const ELEMENT_PATTERN: &str =
    r#"<g\s+id="([^"]*)"\s+class="(node|edge|cluster)"[^>]*>\s*<title>([^<]*)</title>"#;
const ENTITY_PATTERN: &str = r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
    Cluster,
}

impl ElementKind {
    fn from_class(class: &str) -> Option<Self> {
        match class {
            "node" => Some(Self::Node),
            "edge" => Some(Self::Edge),
            "cluster" => Some(Self::Cluster),
            _ => None,
        }
    }
}

/// One rendered element: its SVG id, kind and decoded title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    pub id: String,
    pub kind: ElementKind,
    pub title: String,
}

impl Titled for SvgElement {
    fn title(&self) -> &str {
        &self.title
    }
}

/// The titled elements of one rendered SVG, in document order.
#[derive(Debug, Clone, Default)]
pub struct SvgElements {
    pub nodes: Vec<SvgElement>,
    pub edges: Vec<SvgElement>,
    pub clusters: Vec<SvgElement>,
}

impl SvgElements {
    /// Scans SVG text for titled node, edge and cluster groups.
    ///
    /// # Errors
    /// Returns error if the scanning patterns fail to compile.
    pub fn extract(svg: &str) -> Result<Self> {
        let element_re = Regex::new(ELEMENT_PATTERN)?;
        let entity_re = Regex::new(ENTITY_PATTERN)?;

        let mut elements = Self::default();
        for caps in element_re.captures_iter(svg) {
            let (Some(id), Some(class), Some(title)) = (caps.get(1), caps.get(2), caps.get(3)) else {
                continue;
            };
            let Some(kind) = ElementKind::from_class(class.as_str()) else {
                continue;
            };
            let element = SvgElement {
                id: decode_entities(&entity_re, id.as_str()),
                kind,
                title: decode_entities(&entity_re, title.as_str()),
            };
            match kind {
                ElementKind::Node => elements.nodes.push(element),
                ElementKind::Edge => elements.edges.push(element),
                ElementKind::Cluster => elements.clusters.push(element),
            }
        }
        Ok(elements)
    }

    /// Highlight index over the extracted nodes and edges.
    #[must_use]
    pub fn index(&self) -> HighlightIndex<SvgElement> {
        HighlightIndex::build(&self.nodes, &self.edges)
    }

    /// Cluster whose title matches, for drill-down by click.
    #[must_use]
    pub fn cluster(&self, title: &str) -> Option<&SvgElement> {
        self.clusters.iter().find(|c| c.title == title)
    }
}

fn decode_entities(entity_re: &Regex, text: &str) -> String {
    entity_re
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            decode_entity(name).map_or_else(
                || caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
                String::from,
            )
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
