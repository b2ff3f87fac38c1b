//! The outline document: an ordered, never-empty sequence of nodes.
//!
//! Parent/child relations are *derived* from per-node levels by linear scan
//! rather than stored as pointers. Structural edits stay O(1) at the cost of
//! O(depth) parent lookups; there is no tree to rebalance on indent/unindent.

use serde::Serialize;

use crate::error::OutlineError;
use crate::node::{MAX_DEPTH, OutlineNode};

/// An ordered sequence of [`OutlineNode`], always holding at least one node.
///
/// Construction normalizes levels: a node may not sit more than one level
/// below its immediate predecessor, and no node exceeds [`MAX_DEPTH`].
/// Normalization applies only at construction; unindent and node removal may
/// later open level gaps, which are legal and never retroactively repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutlineDocument {
    nodes: Vec<OutlineNode>,
}

impl Default for OutlineDocument {
    fn default() -> Self {
        Self {
            nodes: vec![OutlineNode::new(0)],
        }
    }
}

impl OutlineDocument {
    /// A document with a single empty node at level 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from nodes, clamping out-of-bounds levels.
    ///
    /// An empty input yields the default single-node document. The first
    /// node is bounded only by [`MAX_DEPTH`]; each later node is additionally
    /// bounded by its predecessor's level plus one.
    pub fn from_nodes(nodes: Vec<OutlineNode>) -> Self {
        if nodes.is_empty() {
            return Self::default();
        }
        let mut normalized: Vec<OutlineNode> = Vec::with_capacity(nodes.len());
        for (i, mut node) in nodes.into_iter().enumerate() {
            let bound = match normalized.last() {
                Some(prev) => (prev.level + 1).min(MAX_DEPTH),
                None => MAX_DEPTH,
            };
            if node.level > bound {
                tracing::debug!(
                    position = i,
                    level = node.level,
                    clamped_to = bound,
                    "clamping out-of-bounds outline level on import"
                );
                node.level = bound;
            }
            normalized.push(node);
        }
        Self { nodes: normalized }
    }

    /// Strict JSON import: `[{level, content: [{text, marks}]}]`.
    pub fn try_from_json(json: &str) -> Result<Self, OutlineError> {
        let nodes: Vec<OutlineNode> = serde_json::from_str(json)?;
        Ok(Self::from_nodes(nodes))
    }

    /// Lenient JSON import: malformed input is logged and replaced with the
    /// default single-node document, never propagated.
    pub fn from_json(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(%err, "malformed outline JSON, resetting to empty document");
                Self::default()
            }
        }
    }

    /// JSON export of the whole document.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.nodes).expect("outline nodes serialize to JSON")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document holds at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> Option<&OutlineNode> {
        self.nodes.get(position)
    }

    /// Index of the node's parent: the nearest preceding node with a
    /// strictly lower level. None for top-level nodes.
    pub fn parent_of(&self, position: usize) -> Option<usize> {
        let level = self.nodes.get(position)?.level;
        self.nodes[..position]
            .iter()
            .rposition(|n| n.level < level)
    }

    /// Indices of the node's immediate children: following nodes whose
    /// derived parent is `position`, up to the first node at or above the
    /// node's own level.
    pub fn children_of(&self, position: usize) -> Vec<usize> {
        let Some(node) = self.nodes.get(position) else {
            return Vec::new();
        };
        let mut children = Vec::new();
        for i in position + 1..self.nodes.len() {
            if self.nodes[i].level <= node.level {
                break;
            }
            if self.parent_of(i) == Some(position) {
                children.push(i);
            }
        }
        children
    }

    /// Split a node's content at a char offset, inserting the tail as a new
    /// node immediately after at the same level. Returns the new node's
    /// position.
    pub(crate) fn split_node(&mut self, position: usize, at: usize) -> Option<usize> {
        let node = self.nodes.get_mut(position)?;
        let level = node.level;
        let tail = node.split_off(at);
        self.nodes.insert(
            position + 1,
            OutlineNode {
                level,
                content: tail,
            },
        );
        Some(position + 1)
    }

    /// Set a node's level. Fails outside `[0, MAX_DEPTH]` or for an invalid
    /// position. The predecessor bound is a command-engine concern, not
    /// re-checked here.
    pub(crate) fn set_level(&mut self, position: usize, level: usize) -> bool {
        if level > MAX_DEPTH {
            return false;
        }
        match self.nodes.get_mut(position) {
            Some(node) => {
                node.level = level;
                true
            }
            None => false,
        }
    }

    /// Remove a node. A no-op when it would empty the document.
    pub(crate) fn remove_node(&mut self, position: usize) -> bool {
        if self.nodes.len() <= 1 || position >= self.nodes.len() {
            return false;
        }
        self.nodes.remove(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::InlineRun;

    fn doc(levels: &[usize]) -> OutlineDocument {
        OutlineDocument::from_nodes(levels.iter().map(|&l| OutlineNode::new(l)).collect())
    }

    #[test]
    fn test_default_is_single_empty_node() {
        let doc = OutlineDocument::new();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.node(0).unwrap().level, 0);
        assert!(doc.node(0).unwrap().is_empty());
    }

    #[test]
    fn test_from_nodes_empty_input() {
        assert_eq!(OutlineDocument::from_nodes(vec![]), OutlineDocument::new());
    }

    #[test]
    fn test_from_nodes_clamps_level_jumps() {
        // 0 -> 4 jump clamps to 1; the rest re-chain off the clamped value.
        let doc = doc(&[0, 4, 5]);
        let levels: Vec<_> = doc.nodes().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
    }

    #[test]
    fn test_from_nodes_first_node_bounded_by_max_depth() {
        let doc = doc(&[99]);
        assert_eq!(doc.node(0).unwrap().level, MAX_DEPTH);

        // A non-zero first level within bounds is legal.
        let doc = self::doc(&[3, 4]);
        let levels: Vec<_> = doc.nodes().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![3, 4]);
    }

    #[test]
    fn test_parent_of() {
        let doc = doc(&[0, 1, 2, 1, 0]);
        assert_eq!(doc.parent_of(0), None);
        assert_eq!(doc.parent_of(1), Some(0));
        assert_eq!(doc.parent_of(2), Some(1));
        assert_eq!(doc.parent_of(3), Some(0));
        assert_eq!(doc.parent_of(4), None);
    }

    #[test]
    fn test_children_of() {
        let doc = doc(&[0, 1, 2, 1, 0]);
        assert_eq!(doc.children_of(0), vec![1, 3]);
        assert_eq!(doc.children_of(1), vec![2]);
        assert_eq!(doc.children_of(4), Vec::<usize>::new());
    }

    #[test]
    fn test_children_stop_at_sibling() {
        let doc = doc(&[0, 1, 0, 1]);
        assert_eq!(doc.children_of(0), vec![1]);
        assert_eq!(doc.children_of(2), vec![3]);
    }

    #[test]
    fn test_split_node() {
        let mut doc = OutlineDocument::from_nodes(vec![OutlineNode::with_text(1, "hello world")]);
        let new_pos = doc.split_node(0, 5).unwrap();
        assert_eq!(new_pos, 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.node(0).unwrap().plain_text(), "hello");
        assert_eq!(doc.node(1).unwrap().plain_text(), " world");
        assert_eq!(doc.node(1).unwrap().level, 1);
    }

    #[test]
    fn test_remove_node_never_empties() {
        let mut doc = OutlineDocument::new();
        assert!(!doc.remove_node(0));
        assert_eq!(doc.len(), 1);

        let mut doc = doc2();
        assert!(doc.remove_node(1));
        assert_eq!(doc.len(), 1);
        assert!(!doc.remove_node(0));
    }

    fn doc2() -> OutlineDocument {
        OutlineDocument::from_nodes(vec![OutlineNode::new(0), OutlineNode::new(1)])
    }

    #[test]
    fn test_json_round_trip() {
        let doc = OutlineDocument::from_nodes(vec![
            OutlineNode::with_text(0, "A"),
            OutlineNode {
                level: 1,
                content: vec![InlineRun::marked("B", crate::node::Mark::Italic)],
            },
        ]);
        let json = doc.to_json();
        assert_eq!(OutlineDocument::try_from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_lenient_json_import_recovers() {
        let doc = OutlineDocument::from_json("not json at all");
        assert_eq!(doc, OutlineDocument::new());

        let doc = OutlineDocument::from_json(r#"{"wrong": "shape"}"#);
        assert_eq!(doc, OutlineDocument::new());
    }

    #[test]
    fn test_strict_json_import_errors() {
        assert!(OutlineDocument::try_from_json("[{]").is_err());
    }
}
