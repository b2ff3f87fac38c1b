//! Outline node model: inline runs, formatting marks, and nesting depth.
//!
//! Nodes are positioned by their offset in the owning document; there is no
//! separate stable node ID at this layer (identity across edits is a
//! host-engine concern).

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Maximum nesting depth for an outline node. Level 0 is root depth.
pub const MAX_DEPTH: usize = 10;

/// An inline formatting mark applied to a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Link { href: SmolStr },
}

/// A run of text with a (possibly empty) set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineRun {
    pub text: SmolStr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl InlineRun {
    /// Create an unmarked run.
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a run with a single mark.
    pub fn marked(text: impl Into<SmolStr>, mark: Mark) -> Self {
        Self {
            text: text.into(),
            marks: vec![mark],
        }
    }

    /// Add a mark, keeping the mark list a set.
    pub fn add_mark(&mut self, mark: Mark) {
        if !self.marks.contains(&mark) {
            self.marks.push(mark);
        }
    }

    /// Check whether a mark is present.
    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Length in characters (NOT bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One line-level unit of content with an indentation level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Nesting depth, 0 = top. Bounded by [`MAX_DEPTH`].
    pub level: usize,
    /// Ordered inline runs. Empty for a blank node.
    #[serde(default)]
    pub content: Vec<InlineRun>,
}

impl Default for OutlineNode {
    fn default() -> Self {
        Self::new(0)
    }
}

impl OutlineNode {
    /// Create an empty node at the given level.
    pub fn new(level: usize) -> Self {
        Self {
            level,
            content: Vec::new(),
        }
    }

    /// Create a node with a single unmarked run.
    pub fn with_text(level: usize, text: impl Into<SmolStr>) -> Self {
        Self {
            level,
            content: vec![InlineRun::new(text)],
        }
    }

    /// Total content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.iter().map(InlineRun::char_len).sum()
    }

    /// Whether the node has no visible content.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(InlineRun::is_empty)
    }

    /// Flatten the runs into a plain string, dropping marks.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(|r| r.text.as_str()).collect()
    }

    /// Cut the content at a char offset, keeping the head and returning the
    /// tail. A run straddling the cut point is split into two runs carrying
    /// the same marks. Offsets past the end cut at the end (empty tail).
    pub fn split_off(&mut self, at: usize) -> Vec<InlineRun> {
        let mut head = Vec::new();
        let mut tail = Vec::new();
        let mut consumed = 0usize;

        for run in self.content.drain(..) {
            let run_len = run.char_len();
            if consumed + run_len <= at {
                consumed += run_len;
                head.push(run);
            } else if consumed >= at {
                tail.push(run);
            } else {
                let split = at - consumed;
                let byte_idx = run
                    .text
                    .char_indices()
                    .nth(split)
                    .map(|(i, _)| i)
                    .unwrap_or(run.text.len());
                let (before, after) = run.text.split_at(byte_idx);
                if !before.is_empty() {
                    head.push(InlineRun {
                        text: before.into(),
                        marks: run.marks.clone(),
                    });
                }
                if !after.is_empty() {
                    tail.push(InlineRun {
                        text: after.into(),
                        marks: run.marks,
                    });
                }
                consumed += run_len;
            }
        }

        self.content = head;
        tail
    }
}
