//! Text member discovery and loading.
//!
//! An input is either a single summary file or a directory holding an
//! unpacked export; in the latter case every `.txt` member is read.

use std::io;
use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use tracing::{debug, warn};

/// One decoded text member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.txt` files recursively under `dir`, sorted by path.
///
/// Any entry the walk cannot read (an unreadable subdirectory, a broken or
/// looping symlink) fails the whole search.
pub fn find_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        warn!("Input path does not exist: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|err| walk_error(dir, err))?;
        if entry.file_type().is_file() && is_text_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Load every text member of `path`.
///
/// A regular file is read as the only member. A directory contributes its
/// `.txt` files in path order and must contain at least one.
pub fn load_sources(path: &Path) -> Result<Vec<SourceText>> {
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(vec![read_source(path)?]);
    }

    let files = find_text_files(path)?;
    if files.is_empty() {
        return Err(ReportError::NoTextFiles(path.to_path_buf()));
    }

    let sources = files
        .iter()
        .map(|file| read_source(file))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Loaded {} text files from {}",
        sources.len(),
        path.display()
    );
    Ok(sources)
}

/// Read and decode a single member, stripping a leading UTF-8 BOM.
pub fn read_source(path: &Path) -> Result<SourceText> {
    let bytes = std::fs::read(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text =
        String::from_utf8(bytes).map_err(|_| ReportError::InvalidEncoding(path.to_path_buf()))?;
    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    Ok(SourceText {
        path: path.to_path_buf(),
        text,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn walk_error(root: &Path, err: walkdir::Error) -> ReportError {
    let path = err.path().unwrap_or(root).to_path_buf();
    warn!("Cannot read {}: {}", path.display(), err);
    let source = match err.into_io_error() {
        Some(io_err) => io_err,
        None => io::Error::other("filesystem loop detected"),
    };
    ReportError::FileRead { path, source }
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
