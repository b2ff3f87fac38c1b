//! tangle-outline-core: Pure Rust outline-editing logic without framework
//! dependencies.
//!
//! This crate provides:
//! - `OutlineNode` / `OutlineDocument` - a flat, level-indexed outline model
//! - `OutlineEngine` - structural commands (split, indent, unindent, merge)
//! - `to_markdown` / `from_markdown` - bullet-list transcoding
//! - `EventBus` - synchronous structural-change notifications
//! - `OutlineHost` - the capability seam to the host rich-text engine

pub mod commands;
pub mod document;
pub mod error;
pub mod events;
pub mod host;
pub mod markdown;
pub mod node;

pub use commands::OutlineEngine;
pub use document::OutlineDocument;
pub use error::OutlineError;
pub use events::{EventBus, ListenerId, OutlineEvent};
pub use host::{Caret, OutlineHost, PlainHost, Transaction};
pub use markdown::{from_markdown, to_markdown};
pub use node::{InlineRun, MAX_DEPTH, Mark, OutlineNode};
pub use smol_str::SmolStr;
