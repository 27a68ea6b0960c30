//! Unified diff rendering

use similar::TextDiff;

/// Lines of context around each change
const CONTEXT_LINES: usize = 3;

/// Unified diff between two versions of `name`; empty when they are equal
#[must_use]
pub fn unified(old: &str, new: &str, name: &str) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
