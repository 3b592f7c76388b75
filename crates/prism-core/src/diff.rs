//! Line-oriented comparison between an original text and its transformation.
//!
//! The comparison walks both sides in lockstep: equal lines become context,
//! unequal lines become a removal followed by an addition. A pure insertion
//! therefore shows up as a run of replace pairs rather than a minimal edit
//! script.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters of each side kept by [`summary_diff`].
pub const SUMMARY_WIDTH: usize = 80;

/// One rendered line of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum DiffLine {
    Context(String),
    Removed(String),
    Added(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Context(line) => write!(f, "  {}", line),
            DiffLine::Removed(line) => write!(f, "- {}", line),
            DiffLine::Added(line) => write!(f, "+ {}", line),
        }
    }
}

/// Compares `original` and `updated` line by line.
pub fn line_diff(original: &str, updated: &str) -> Vec<DiffLine> {
    let left: Vec<&str> = original.split('\n').collect();
    let right: Vec<&str> = updated.split('\n').collect();

    let mut out = Vec::with_capacity(left.len().max(right.len()));
    let mut i = 0;
    let mut j = 0;

    while i < left.len() || j < right.len() {
        match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) if l == r => {
                out.push(DiffLine::Context((*l).to_string()));
            }
            (Some(l), Some(r)) => {
                out.push(DiffLine::Removed((*l).to_string()));
                out.push(DiffLine::Added((*r).to_string()));
            }
            (Some(l), None) => out.push(DiffLine::Removed((*l).to_string())),
            (None, Some(r)) => out.push(DiffLine::Added((*r).to_string())),
            (None, None) => break,
        }
        i += 1;
        j += 1;
    }

    out
}

/// Renders `original` vs `updated` as newline-joined diff text.
pub fn render_diff(original: &str, updated: &str) -> String {
    line_diff(original, updated)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed-shape unified-diff header with both sides truncated. Display only.
pub fn summary_diff(original: &str, updated: &str) -> String {
    format!(
        "--- Original\n+++ Optimized\n@@ -1,1 +1,1 @@\n-{}\n+{}",
        truncate(original, SUMMARY_WIDTH),
        truncate(updated, SUMMARY_WIDTH)
    )
}

fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= width {
        flat
    } else {
        let mut cut: String = flat.chars().take(width).collect();
        cut.push('…');
        cut
    }
}
