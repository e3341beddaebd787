//! Per-file class prefix rewriting.
//!
//! ```text
//! path ──► Token::from_path ──► read + decode ──► ClassCounts::scan
//!                                                     │
//!                          looks_prefixed? ── yes ──► Skipped
//!                                 │ no
//!                                 ▼
//!                          prefix_classes ──► persist ──► Updated
//! ```
//!
//! Each call is independent: no state is shared between files.

mod classes;
mod error;
mod persist;
mod token;

pub use classes::ClassCounts;
pub use error::RewriteError;

use classes::{CLASS_MARKER, prefix_classes};
use persist::persist;
use token::Token;

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::WriteMode;
use crate::{debug, log};

/// Knobs for a single file rewrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    pub write_mode: WriteMode,
    /// Compute the outcome without writing.
    pub dry_run: bool,
    /// Emit per-file log lines (off while a progress line is drawn).
    pub log_files: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Counts say the file is already prefixed; left untouched.
    Skipped { counts: ClassCounts },
    /// File rewritten; `replaced` occurrences of `cls` prefixed.
    Updated { counts: ClassCounts, replaced: usize },
    /// Dry run: the file would have been rewritten.
    Planned { counts: ClassCounts, replaced: usize },
}

/// Rewrite one file in place, prefixing every `cls` with the file's token.
///
/// Skips the file when every `cls` already carries the prefix (see
/// [`ClassCounts::looks_prefixed`]). A file without any `cls` is still
/// written back, unchanged.
pub fn process(path: &Path, options: &RewriteOptions) -> Result<Outcome, RewriteError> {
    if options.log_files {
        log!("rewrite"; "{}", path.display());
    }

    let token = Token::from_path(path);
    debug!("token"; "`{}` for {}", token, path.display());
    if token.is_empty() {
        debug!("token"; "empty after sanitizing, prefix is `-{}`", CLASS_MARKER);
    }

    let bytes = fs::read(path).map_err(|e| RewriteError::io(path, e))?;
    let content = std::str::from_utf8(&bytes).map_err(|e| RewriteError::decode(path, e))?;

    let counts = ClassCounts::scan(content, &token);
    if options.log_files {
        log!(
            "count";
            "{} `{}`, {} `{}`",
            counts.raw,
            CLASS_MARKER,
            counts.prefixed,
            token.prefixed(CLASS_MARKER)
        );
    }

    if counts.looks_prefixed() {
        if options.log_files {
            log!("skip"; "{} appears to be already updated", path.display());
        }
        return Ok(Outcome::Skipped { counts });
    }

    let rewritten = prefix_classes(content, &token);
    let replaced = counts.raw;

    if options.dry_run {
        if options.log_files {
            log!("dry-run"; "would prefix {} in {}", replaced, path.display());
        }
        return Ok(Outcome::Planned { counts, replaced });
    }

    persist(path, &rewritten, options.write_mode).map_err(|e| RewriteError::io(path, e))?;

    if options.log_files {
        log!("updated"; "{}", path.display());
    }
    Ok(Outcome::Updated { counts, replaced })
}
