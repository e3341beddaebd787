//! Run configuration.
//!
//! There is no config file: every setting comes from the command line.
//! [`RunConfig::from_cli`] turns parsed arguments into the settings the
//! batch runner and the rewriter read.
//!
//! | Flag               | Setting                          | Default      |
//! |--------------------|----------------------------------|--------------|
//! | `--keep-going`     | [`ErrorPolicy`]                  | `fail-fast`  |
//! | `--atomic`         | [`WriteMode`]                    | `in-place`   |
//! | `--dry-run`        | `dry_run`                        | `false`      |
//! | `--jobs`           | `jobs`                           | `1`          |
//! | `--report`         | [`ReportFormat`]                 | `text`       |

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::Cli;
use crate::rewrite::RewriteOptions;

/// What a batch does when one file fails.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failing file and return its error.
    #[default]
    FailFast,
    /// Record the failure and continue with the remaining files.
    KeepGoing,
}

/// How rewritten content reaches the disk.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Truncate and overwrite the original file.
    #[default]
    InPlace,
    /// Write a sibling temp file, then rename it over the original.
    Atomic,
}

/// Summary output format
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One colored summary line.
    #[default]
    Text,
    /// Full per-file report as JSON on stdout.
    Json,
}

/// Settings for one invocation
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// File or directory given on the command line.
    pub target: PathBuf,
    pub error_policy: ErrorPolicy,
    pub write_mode: WriteMode,
    pub dry_run: bool,
    /// Worker threads; 1 means sequential, in listing order.
    pub jobs: usize,
    pub report: ReportFormat,
    pub pretty: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::new(),
            error_policy: ErrorPolicy::FailFast,
            write_mode: WriteMode::InPlace,
            dry_run: false,
            jobs: 1,
            report: ReportFormat::Text,
            pretty: false,
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Build and validate settings from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Self {
            target: cli.path.clone(),
            error_policy: if cli.keep_going {
                ErrorPolicy::KeepGoing
            } else {
                ErrorPolicy::FailFast
            },
            write_mode: if cli.atomic {
                WriteMode::Atomic
            } else {
                WriteMode::InPlace
            },
            dry_run: cli.dry_run,
            jobs: cli.jobs,
            report: cli.report,
            pretty: cli.pretty,
            verbose: cli.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            bail!("--jobs must be at least 1");
        }
        if self.pretty && self.report != ReportFormat::Json {
            crate::debug!("config"; "--pretty has no effect without --report json");
        }
        Ok(())
    }

    /// Runs on more than one thread.
    pub fn is_parallel(&self) -> bool {
        self.jobs > 1
    }

    /// Per-file options handed to the rewriter.
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            write_mode: self.write_mode,
            dry_run: self.dry_run,
            log_files: self.report == ReportFormat::Text,
        }
    }
}
