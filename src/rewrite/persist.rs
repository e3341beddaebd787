//! Writing rewritten content back to disk.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::WriteMode;

/// Replace the whole file with `content`.
///
/// `InPlace` truncates and writes the original file; an interrupted write
/// can lose data. `Atomic` writes a sibling temp file and renames it over
/// the original. Both write through symlinks.
pub fn persist(path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
    match mode {
        WriteMode::InPlace => fs::write(path, content),
        WriteMode::Atomic => write_atomic(path, content),
    }
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    // Rename onto the link target, not over the link itself
    let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = path.as_path();

    // Same directory so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
