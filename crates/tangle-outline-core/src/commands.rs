//! Structural command engine.
//!
//! `OutlineEngine` is the dispatch point the host keymap calls into: it
//! inspects the node at the current selection, validates preconditions,
//! applies the edit to the document, mirrors it to the host as a
//! [`Transaction`], and notifies listeners. Every command returns `bool`:
//! `false` means "not applicable, nothing happened" and is not a failure.
//!
//! Mutation always happens-before notification; listener behavior can never
//! roll an edit back.

use crate::document::OutlineDocument;
use crate::events::{EventBus, ListenerId, OutlineEvent};
use crate::host::{Caret, OutlineHost, Transaction};
use crate::markdown;
use crate::node::{MAX_DEPTH, OutlineNode};

/// The outline editing session: document, host capability, and listeners.
#[derive(Debug)]
pub struct OutlineEngine<H: OutlineHost> {
    doc: OutlineDocument,
    host: H,
    events: EventBus,
}

impl<H: OutlineHost> OutlineEngine<H> {
    /// Create an engine over the default single-node document.
    pub fn new(host: H) -> Self {
        Self::with_document(OutlineDocument::new(), host)
    }

    /// Create an engine over an existing document.
    pub fn with_document(doc: OutlineDocument, host: H) -> Self {
        Self {
            doc,
            host,
            events: EventBus::new(),
        }
    }

    pub fn document(&self) -> &OutlineDocument {
        &self.doc
    }

    /// Direct access to the host capability.
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // === Event subscription ===

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OutlineEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Whole-document import/export ===

    /// Replace the document, normalizing levels. Emits no events: import is
    /// a wholesale replacement, not a structural command.
    pub fn set_document(&mut self, nodes: Vec<OutlineNode>) {
        self.doc = OutlineDocument::from_nodes(nodes);
    }

    /// Replace the document from JSON. Malformed input resets to the default
    /// document and returns false; the engine stays usable either way.
    pub fn set_document_json(&mut self, json: &str) -> bool {
        match OutlineDocument::try_from_json(json) {
            Ok(doc) => {
                self.doc = doc;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "malformed outline JSON, resetting to empty document");
                self.doc = OutlineDocument::new();
                false
            }
        }
    }

    pub fn document_json(&self) -> String {
        self.doc.to_json()
    }

    pub fn to_markdown(&self) -> String {
        markdown::to_markdown(&self.doc)
    }

    /// Replace the document from indented bullet text (lossy for
    /// non-bullet lines, per the transcoder contract).
    pub fn from_markdown_text(&mut self, text: &str) {
        self.doc = markdown::from_markdown(text);
    }

    // === Structural commands ===

    /// Split the current node at the caret. The tail moves into a new node
    /// at the same level, inserted immediately after; the host caret lands
    /// at the new node's start.
    pub fn split(&mut self) -> bool {
        let Some(caret) = self.governed_caret() else {
            return false;
        };
        let Some(new_pos) = self.doc.split_node(caret.node, caret.offset) else {
            return false;
        };
        self.host.apply(&Transaction::SplitNode {
            position: caret.node,
            at: caret.offset,
            caret_after: Caret::collapsed(new_pos, 0),
        });
        self.events.emit(&OutlineEvent::Created { position: new_pos });
        true
    }

    /// Deepen the current node one level. Bounded by [`MAX_DEPTH`] and by
    /// the predecessor's level plus one (forward growth may not open a gap;
    /// existing gaps from unindent are never repaired).
    pub fn indent(&mut self) -> bool {
        let Some(caret) = self.governed_caret() else {
            return false;
        };
        let position = caret.node;
        let level = self.doc.nodes()[position].level;
        if level >= MAX_DEPTH {
            return false;
        }
        if position > 0 && level > self.doc.nodes()[position - 1].level {
            return false;
        }
        let level = level + 1;
        self.doc.set_level(position, level);
        self.host.apply(&Transaction::SetLevel { position, level });
        self.events.emit(&OutlineEvent::Indented { position, level });
        true
    }

    /// Shallow the current node one level. No-op at level 0.
    pub fn unindent(&mut self) -> bool {
        let Some(caret) = self.governed_caret() else {
            return false;
        };
        let position = caret.node;
        let level = self.doc.nodes()[position].level;
        if level == 0 {
            return false;
        }
        let level = level - 1;
        self.doc.set_level(position, level);
        self.host.apply(&Transaction::SetLevel { position, level });
        self.events.emit(&OutlineEvent::Unindented { position, level });
        true
    }

    /// Remove the current node on backspace-at-start-of-empty-node.
    ///
    /// Applies only when the selection is collapsed at offset 0, the node
    /// has no content, and the document holds more than one node. Caret
    /// repositioning after the removal is the host's job.
    pub fn merge_if_empty(&mut self) -> bool {
        let Some(caret) = self.governed_caret() else {
            return false;
        };
        if !caret.collapsed || caret.offset != 0 {
            return false;
        }
        let position = caret.node;
        if !self.doc.nodes()[position].is_empty() {
            return false;
        }
        if !self.doc.remove_node(position) {
            return false;
        }
        self.host.apply(&Transaction::RemoveNode { position });
        true
    }

    /// Inbound observation hook: the host reports an inline content edit
    /// inside a governed node. Emits `ContentChanged` for a valid position.
    pub fn notify_content_changed(&mut self, position: usize) -> bool {
        if position >= self.doc.len() {
            return false;
        }
        self.events.emit(&OutlineEvent::ContentChanged { position });
        true
    }

    /// The host caret, validated against the current document. `None` when
    /// the selection is outside a governed node or stale.
    fn governed_caret(&self) -> Option<Caret> {
        let caret = self.host.caret()?;
        let node = self.doc.node(caret.node)?;
        if caret.offset > node.char_len() {
            return None;
        }
        Some(caret)
    }
}
