// src/dot/tree.rs
//! Prefix tree of module paths, used to nest clusters.

use std::collections::HashMap;

use tracing::warn;

use crate::report::Module;

/// One path segment. A node can be a module, a cluster, or both.
#[derive(Debug, Default)]
pub struct PathNode<'a> {
    pub segment: String,
    /// Cumulative path up to and including this segment.
    pub path: String,
    pub module: Option<&'a Module>,
    pub children: Vec<PathNode<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> PathNode<'a> {
    fn new(segment: &str, path: String) -> Self {
        Self {
            segment: segment.to_string(),
            path,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_cluster(&self) -> bool {
        !self.children.is_empty()
    }

    fn child_mut(&mut self, segment: &str) -> &mut PathNode<'a> {
        let existing = self.index.get(segment).copied();
        let slot = match existing {
            Some(slot) => slot,
            None => {
                let path = if self.path.is_empty() {
                    segment.to_string()
                } else {
                    format!("{}/{segment}", self.path)
                };
                self.children.push(PathNode::new(segment, path));
                self.index.insert(segment.to_string(), self.children.len() - 1);
                self.children.len() - 1
            }
        };
        &mut self.children[slot]
    }
}

/// Folds module sources into a tree rooted at an unnamed node.
///
/// Children keep the order in which they were first seen. Empty segments
/// (leading, trailing or doubled slashes) do not open clusters.
#[must_use]
pub fn build(modules: &[Module]) -> PathNode<'_> {
    let mut root = PathNode::default();
    for module in modules {
        let segments: Vec<&str> = module.source.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = segments.split_last() else {
            root.child_mut(&module.source).module = Some(module);
            continue;
        };

        let mut node = &mut root;
        for segment in parents {
            node = node.child_mut(segment);
        }
        let leaf = node.child_mut(last);
        match leaf.module {
            Some(kept) => warn!(
                kept = %kept.source,
                dropped = %module.source,
                "module path collides with an earlier one; node not rendered"
            ),
            None => leaf.module = Some(module),
        }
    }
    root
}
