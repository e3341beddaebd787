//! Class-name counting and substitution.
//!
//! Both operate on plain text: no XML or CSS awareness. Matching is
//! non-overlapping and left to right, the same scan `str::matches` and
//! `str::replace` perform.

use serde::Serialize;

use super::Token;

/// Literal class marker emitted by common SVG exporters (`.cls-1`, `cls-2`, ...).
pub const CLASS_MARKER: &str = "cls";

/// Occurrence counts used to guess whether a file was already rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassCounts {
    /// Occurrences of `cls`.
    pub raw: usize,
    /// Occurrences of `{token}-cls`.
    pub prefixed: usize,
}

impl ClassCounts {
    pub fn scan(content: &str, token: &Token) -> Self {
        Self {
            raw: content.matches(CLASS_MARKER).count(),
            prefixed: content.matches(&token.prefixed(CLASS_MARKER)).count(),
        }
    }

    /// Every `cls` already carries this file's prefix.
    ///
    /// A count heuristic: equal non-zero counts mean "done". A file whose
    /// counts match by coincidence is skipped too.
    pub fn looks_prefixed(&self) -> bool {
        self.raw == self.prefixed && self.raw != 0
    }
}

/// Replace every `cls` with `{token}-cls` in a single pass.
///
/// The inserted text is never rescanned, so `cls` inside the token itself
/// is left alone.
pub fn prefix_classes(content: &str, token: &Token) -> String {
    content.replace(CLASS_MARKER, &token.prefixed(CLASS_MARKER))
}
