//! Batch report types and formatting.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::config::{ReportFormat, RunConfig};
use crate::log;
use crate::rewrite::{Outcome, RewriteError};

/// Result for one file, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Option<Outcome>,
    /// Failure message when the file could not be rewritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a batch did
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileRecord>,
    /// Stopped early by Ctrl+C.
    pub interrupted: bool,
}

/// Per-status totals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub updated: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn push_outcome(&mut self, path: &Path, outcome: Outcome) {
        self.files.push(FileRecord {
            path: path.to_path_buf(),
            outcome: Some(outcome),
            error: None,
        });
    }

    pub fn push_failure(&mut self, err: &RewriteError) {
        self.files.push(FileRecord {
            path: err.path().to_path_buf(),
            outcome: None,
            error: Some(err.detail()),
        });
    }

    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for record in &self.files {
            match record.outcome {
                Some(Outcome::Updated { .. }) => totals.updated += 1,
                Some(Outcome::Skipped { .. }) => totals.skipped += 1,
                Some(Outcome::Planned { .. }) => totals.planned += 1,
                None => totals.failed += 1,
            }
        }
        totals
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|r| r.error.is_some())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|r| r.error.is_some())
    }

    /// Print the report in the configured format.
    pub fn print(&self, config: &RunConfig) -> Result<()> {
        match config.report {
            ReportFormat::Text => {
                self.print_text();
                Ok(())
            }
            ReportFormat::Json => self.print_json(config.pretty),
        }
    }

    fn print_text(&self) {
        for (module, message) in self.text_lines() {
            log!(module; "{}", message);
        }
    }

    /// `(module, message)` pairs of the text summary: one per failure, then the totals.
    fn text_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines: Vec<_> = self
            .failures()
            .filter_map(|record| record.error.clone())
            .map(|error| ("failed", error))
            .collect();
        if self.interrupted {
            lines.push(("interrupt", "stopped before all files were processed".to_string()));
        }
        lines.push(("done", self.totals().summary()));
        lines
    }

    fn print_json(&self, pretty: bool) -> Result<()> {
        println!("{}", self.to_json(pretty)?);
        Ok(())
    }

    /// The whole report as one JSON document.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let formatted = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(formatted)
    }
}

impl Totals {
    /// `2 updated, 1 skipped, 1 failed`; zero counts other than updated are left out.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} updated", self.updated)];
        if self.planned > 0 {
            parts.push(format!("{} planned", self.planned));
        }
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed));
        }
        parts.join(", ")
    }
}

/// `"s"` unless `n` is exactly one.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
