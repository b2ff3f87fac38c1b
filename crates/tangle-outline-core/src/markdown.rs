//! Bidirectional mapping between the outline tree and indented bullet text.
//!
//! Export emits one `- ` bullet per node, indented two spaces per level.
//! Import reads the same shape back. The grammar is a fixed micro-format,
//! not CommonMark: only bold/italic/code/link spans are modeled, and only
//! single-mark runs with even indentation round-trip exactly. Multi-mark
//! runs flatten into nested wrappers on export and come back as a single
//! outermost-marked run; odd leading spaces floor-divide into a level. Both
//! are documented lossy edge cases, not errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::OutlineDocument;
use crate::node::{InlineRun, Mark, OutlineNode};

/// Spaces per indentation level.
const INDENT: &str = "  ";

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s+(.*)$").expect("valid bullet regex"));

/// Inline spans in first-match order: bold, italic, code, link. Leftmost
/// match wins; at the same position the earlier alternative wins, so `**`
/// is tried before `*`.
static INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`(.+?)`|\[([^\]]*)\]\(([^)]*)\)")
        .expect("valid inline span regex")
});

/// Render the whole document as indented bullet lines, newline-joined.
pub fn to_markdown(doc: &OutlineDocument) -> String {
    doc.nodes()
        .iter()
        .map(render_node)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse indented bullet text into a document.
///
/// Lines not matching the bullet pattern are dropped with a log. Input with
/// no bullet lines yields the default single-node document. Levels are
/// clamped to the document invariant on construction.
pub fn from_markdown(text: &str) -> OutlineDocument {
    let mut nodes = Vec::new();
    for line in text.lines() {
        match BULLET_RE.captures(line) {
            Some(caps) => {
                let level = caps[1].chars().count() / 2;
                nodes.push(OutlineNode {
                    level,
                    content: parse_inline(&caps[2]),
                });
            }
            None => {
                tracing::debug!(line, "dropping non-bullet line on markdown import");
            }
        }
    }
    OutlineDocument::from_nodes(nodes)
}

fn render_node(node: &OutlineNode) -> String {
    let mut line = INDENT.repeat(node.level);
    line.push_str("- ");
    for run in &node.content {
        line.push_str(&render_run(run));
    }
    line
}

/// Wrap a run's text in its mark syntax. Nesting order, innermost first:
/// code, italic, bold, link. Bold outermost of the three text marks is the
/// fixed tie-break; link wraps everything.
fn render_run(run: &InlineRun) -> String {
    let mut out = run.text.to_string();
    if run.has_mark(&Mark::Code) {
        out = format!("`{out}`");
    }
    if run.has_mark(&Mark::Italic) {
        out = format!("*{out}*");
    }
    if run.has_mark(&Mark::Bold) {
        out = format!("**{out}**");
    }
    if let Some(href) = run.marks.iter().find_map(|m| match m {
        Mark::Link { href } => Some(href),
        _ => None,
    }) {
        out = format!("[{out}]({href})");
    }
    out
}

/// Split line text into runs on non-overlapping inline spans; text between
/// spans becomes unmarked runs.
fn parse_inline(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut last = 0usize;
    for caps in INLINE_RE.captures_iter(text) {
        let whole = caps.get(0).expect("match always has a whole-match group");
        if whole.start() > last {
            runs.push(InlineRun::new(&text[last..whole.start()]));
        }
        if let Some(inner) = caps.get(1) {
            runs.push(InlineRun::marked(inner.as_str(), Mark::Bold));
        } else if let Some(inner) = caps.get(2) {
            runs.push(InlineRun::marked(inner.as_str(), Mark::Italic));
        } else if let Some(inner) = caps.get(3) {
            runs.push(InlineRun::marked(inner.as_str(), Mark::Code));
        } else if let (Some(label), Some(href)) = (caps.get(4), caps.get(5)) {
            runs.push(InlineRun::marked(
                label.as_str(),
                Mark::Link {
                    href: href.as_str().into(),
                },
            ));
        }
        last = whole.end();
    }
    if last < text.len() {
        runs.push(InlineRun::new(&text[last..]));
    }
    runs
}
