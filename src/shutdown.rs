//! Ctrl+C handling.
//!
//! The first Ctrl+C asks the batch to stop before its next file; a file
//! that is already being written always finishes. A second Ctrl+C exits
//! immediately.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("interrupt"; "stopping after the current file (Ctrl+C again to abort)");
    })?;
    Ok(())
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
