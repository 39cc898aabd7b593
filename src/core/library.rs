//! core/library.rs
//! Turn command-line inputs into the list of files to process.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::error::{CleanError, CleanResult};

/// Files pass through as given; directories are walked for `.mp3` files.
pub fn expand(input: &Path) -> CleanResult<Vec<PathBuf>> {
    if input.is_dir() {
        scan_mp3s(input)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

/// Every `.mp3` under `root`, following symlinks but visiting each real directory once.
///
/// An unreadable `root` is an error; unreadable directories below it are logged and skipped.
pub fn scan_mp3s(root: &Path) -> CleanResult<Vec<PathBuf>> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();

    let entries = read_dir_once(root, &mut visited)
        .map_err(CleanError::io(root, "failed to list directory"))?;
    let mut pending: Vec<PathBuf> = Vec::new();
    collect(entries, &mut pending, &mut out);

    while let Some(dir) = pending.pop() {
        match read_dir_once(&dir, &mut visited) {
            Ok(entries) => collect(entries, &mut pending, &mut out),
            Err(e) => warn!("Skipping {}: {e}", dir.display()),
        }
    }

    Ok(out)
}

/// `read_dir`, or an empty listing when the directory's real path was already seen.
fn read_dir_once(dir: &Path, visited: &mut HashSet<PathBuf>) -> io::Result<Vec<PathBuf>> {
    if !visited.insert(fs::canonicalize(dir)?) {
        debug!("Already scanned {}, skipping", dir.display());
        return Ok(Vec::new());
    }
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect()
}

fn collect(entries: Vec<PathBuf>, pending: &mut Vec<PathBuf>, out: &mut Vec<PathBuf>) {
    for path in entries {
        if path.is_dir() {
            pending.push(path);
        } else if has_mp3_extension(&path) {
            out.push(path);
        }
    }
}

fn has_mp3_extension(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some(ext) if ext.eq_ignore_ascii_case("mp3"))
}
