//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro gated by `--verbose`
//! - `ProgressLine` for the single-line counter used by parallel runs
//!
//! # Example
//!
//! ```ignore
//! log!("rewrite"; "processing {}", path.display());
//! debug!("token"; "derived `{}`", token);
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    io::{self, IsTerminal, StderrLock, StdoutLock, Write, stderr, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Whether a progress line currently owns the last terminal row
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Log lines go to stderr instead of stdout (set for `--report json`)
static TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Route log lines and the progress line to stderr, leaving stdout to the report
pub fn set_stderr(v: bool) {
    TO_STDERR.store(v, Ordering::SeqCst);
}

fn log_stream() -> Stream {
    if TO_STDERR.load(Ordering::SeqCst) {
        Stream::Stderr
    } else {
        Stream::Stdout
    }
}

/// Locked handle on whichever stream log lines currently go to
enum Output {
    Stdout(StdoutLock<'static>),
    Stderr(StderrLock<'static>),
}

impl Output {
    fn lock() -> Self {
        match log_stream() {
            Stream::Stderr => Self::Stderr(stderr().lock()),
            _ => Self::Stdout(stdout().lock()),
        }
    }

    fn is_terminal(&self) -> bool {
        match self {
            Self::Stdout(out) => out.is_terminal(),
            Self::Stderr(err) => err.is_terminal(),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::Stderr(err) => err.flush(),
        }
    }
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut out = Output::lock();

    // Keep the progress line at the bottom: erase it, print, let the next inc redraw
    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        execute!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
    }

    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` through the owo-colors override, checked against the
/// stream the line is written to.
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module.to_ascii_lowercase().as_str() {
        "error" | "failed" => Style::new().bright_red().bold(),
        "skip" => Style::new().bright_yellow().bold(),
        "updated" | "done" => Style::new().bright_green().bold(),
        "dry-run" => Style::new().bright_magenta().bold(),
        _ => Style::new().bright_blue().bold(),
    };
    prefix
        .if_supports_color(log_stream(), |p| p.style(style))
        .to_string()
}

// ============================================================================
// Progress Line (single-line counter)
// ============================================================================

/// Single-line progress display for parallel batches
///
/// Displays: `[rewrite] svg(42/69)`
///
/// The counter updates in place. Uses `try_lock` so worker threads never
/// block on the terminal; if a redraw is in flight the update is skipped.
pub struct ProgressLine {
    label: &'static str,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
    enabled: bool,
}

impl ProgressLine {
    /// Create a progress line. Draws nothing unless the log stream is a terminal.
    pub fn new(label: &'static str, total: usize) -> Self {
        let enabled = total > 0 && Output::lock().is_terminal();
        if enabled {
            PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        }

        let progress = Self {
            label,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
            enabled,
        };
        progress.display();
        progress
    }

    /// Count one finished item.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if self.enabled && self.lock.try_lock().is_some() {
            self.display();
        }
    }

    /// Number of items counted so far.
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    fn line(&self) -> String {
        format!("{}({}/{})", self.label, self.current(), self.total)
    }

    fn display(&self) {
        if !self.enabled {
            return;
        }
        let mut out = Output::lock();
        execute!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        write!(out, "{} {}", colorize_prefix("rewrite"), self.line()).ok();
        out.flush().ok();
    }

    /// Finish the display, keeping the final counts on screen.
    pub fn finish(self) {
        if self.enabled {
            let _guard = self.lock.lock();
            let mut out = Output::lock();
            execute!(
                out,
                cursor::MoveToColumn(0),
                Clear(ClearType::CurrentLine)
            )
            .ok();
            writeln!(out, "{} {}", colorize_prefix("rewrite"), self.line()).ok();
            out.flush().ok();
        }
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        std::mem::forget(self); // Prevent Drop from clearing
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        if !self.enabled {
            return;
        }
        let mut out = Output::lock();
        execute!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        out.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
