//! Resolving the command-line path into SVG files (pure, no side effects).
//!
//! ```text
//! icons/            -> Directory { files: [icons/a.svg, icons/b.SVG] }
//! ├── a.svg
//! ├── b.SVG
//! ├── c.txt         -> (ignored)
//! └── nested/
//!     └── d.svg     -> (ignored, non-recursive)
//!
//! logo.svg          -> File(logo.svg)
//! notes.txt         -> NotSvg(notes.txt)
//! missing/          -> Missing(missing/)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// What the command-line path turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A directory and its direct `.svg` children, in listing order.
    Directory { dir: PathBuf, files: Vec<PathBuf> },
    /// A single `.svg` file.
    File(PathBuf),
    /// A regular file without the `.svg` extension.
    NotSvg(PathBuf),
    /// Neither a file nor a directory.
    Missing(PathBuf),
}

impl Target {
    /// Files to hand to the rewriter.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Directory { files, .. } => files,
            Self::File(path) => std::slice::from_ref(path),
            Self::NotSvg(_) | Self::Missing(_) => &[],
        }
    }
}

/// Classify `path` and collect its SVG files.
pub fn resolve(path: &Path) -> Result<Target> {
    if path.is_dir() {
        let files = collect_svg_files(path)?;
        return Ok(Target::Directory {
            dir: path.to_path_buf(),
            files,
        });
    }

    if path.is_file() {
        return Ok(if is_svg(path) {
            Target::File(path.to_path_buf())
        } else {
            Target::NotSvg(path.to_path_buf())
        });
    }

    Ok(Target::Missing(path.to_path_buf()))
}

/// Direct children of `dir` named `*.svg` (any case), unsorted.
///
/// Subdirectories are never entered, even when their name ends in `.svg`.
pub fn collect_svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if is_svg(&path) && !path.is_dir() {
            files.push(path);
        }
    }

    Ok(files)
}

/// The file name ends in `.svg`, compared case-insensitively.
pub fn is_svg(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(".svg"))
        .unwrap_or(false)
}
