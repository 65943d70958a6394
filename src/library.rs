//! Music directory scanning.
//!
//! Produces the ordered playlist the engine consumes: the audio files
//! directly inside one directory, as absolute paths, sorted
//! lexicographically.

use log::{debug, warn};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{AUDIO_EXTENSIONS, SKIP_FILES};

/// Check whether a path has one of the recognised audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Check if a file or directory is hidden (starts with '.')
pub fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// File name without its extension, for display.
pub fn track_title(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Collect the audio files in `dir` (not recursive).
///
/// Entries that cannot be read are logged and skipped. Hidden files are
/// skipped unless `include_hidden` is set.
pub fn scan_directory(dir: &Path, include_hidden: bool) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let dir = fs::canonicalize(dir)
        .map_err(|e| format!("Cannot open directory {}: {e}", dir.display()))?;

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if !include_hidden && is_hidden_file(&path) {
            continue;
        }
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| SKIP_FILES.contains(&name))
        {
            continue;
        }
        if is_audio_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!("Found {} audio files in {}", files.len(), dir.display());
    Ok(files)
}
