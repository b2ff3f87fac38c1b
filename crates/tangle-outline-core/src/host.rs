//! Host capability seam.
//!
//! The rich-text engine that owns cursor state, rendering, and the
//! underlying text buffer is reached only through [`OutlineHost`]. The
//! command engine asks the host where the selection sits and hands back a
//! [`Transaction`] describing each structural edit so the host can mirror it
//! into its own buffer. This keeps the outline model host-agnostic and
//! independently testable.

/// Caret position inside a governed outline node, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Position of the node in the document.
    pub node: usize,
    /// Char offset within the node's flattened content.
    pub offset: usize,
    /// Whether the selection is collapsed to a caret.
    pub collapsed: bool,
}

impl Caret {
    /// A collapsed caret at the given node and offset.
    pub fn collapsed(node: usize, offset: usize) -> Self {
        Self {
            node,
            offset,
            collapsed: true,
        }
    }
}

/// A structural edit, handed to the host after the model has applied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// A node was cut at `at`; the tail now lives in a new node at
    /// `position + 1`. The caret belongs at `caret_after`.
    SplitNode {
        position: usize,
        at: usize,
        caret_after: Caret,
    },
    /// A node's level changed.
    SetLevel { position: usize, level: usize },
    /// A node was removed. Caret repositioning is the host's job.
    RemoveNode { position: usize },
}

/// Capabilities the outline model consumes from its host.
pub trait OutlineHost {
    /// Current selection position, or `None` when the selection is not
    /// inside a node governed by the outline model.
    fn caret(&self) -> Option<Caret>;

    /// Mirror an already-applied structural edit into the host's buffer.
    fn apply(&mut self, txn: &Transaction);
}

/// Simple field-based host implementation.
///
/// Tracks a caret and records every applied transaction. Use this for tests
/// or non-reactive embedders; real hosts adapt their own selection and
/// transaction machinery instead.
#[derive(Debug, Default)]
pub struct PlainHost {
    caret: Option<Caret>,
    applied: Vec<Transaction>,
}

impl PlainHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the caret, marking the position as governed.
    pub fn set_caret(&mut self, caret: Caret) {
        self.caret = Some(caret);
    }

    /// Clear the caret, as if the selection left the outline.
    pub fn clear_caret(&mut self) {
        self.caret = None;
    }

    /// Every transaction applied so far, in order.
    pub fn applied(&self) -> &[Transaction] {
        &self.applied
    }
}

impl OutlineHost for PlainHost {
    fn caret(&self) -> Option<Caret> {
        self.caret
    }

    fn apply(&mut self, txn: &Transaction) {
        match *txn {
            Transaction::SplitNode { caret_after, .. } => {
                self.caret = Some(caret_after);
            }
            Transaction::RemoveNode { position } => {
                // Land on the previous node; a real host would move to its end.
                self.caret = Some(Caret::collapsed(position.saturating_sub(1), 0));
            }
            Transaction::SetLevel { .. } => {}
        }
        self.applied.push(txn.clone());
    }
}
