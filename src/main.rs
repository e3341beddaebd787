//! svgcls - prefix CSS class names in SVG files with each file's name.
//!
//! SVG exporters tend to name every style `cls-1`, `cls-2`, ... so two
//! inlined icons overwrite each other's fills. Rewriting `cls` to
//! `{file}-cls` keeps them apart.

mod batch;
mod cli;
mod config;
mod logger;
mod report;
mod rewrite;
mod shutdown;
mod target;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::{ReportFormat, RunConfig};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any file is touched)
    shutdown::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = RunConfig::from_cli(&cli)?;
    // JSON reports own stdout
    logger::set_stderr(config.report == ReportFormat::Json);
    debug!("config"; "{:?}", config);

    cli::run::run(&config)
}
