//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::ReportFormat;

/// Prefix CSS class names in SVG files with each file's name
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// An .svg file, or a directory whose .svg files (non-recursive) are rewritten
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub path: PathBuf,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would change without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Continue with the remaining files when one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Write through a temp file and rename, so a failed write keeps the original
    #[arg(short, long)]
    pub atomic: bool,

    /// Number of files processed in parallel
    #[arg(short, long, default_value_t = 1, value_name = "N")]
    pub jobs: usize,

    /// Summary format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,
}
