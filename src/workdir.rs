//! Local working directory helpers
//!
//! The download folder is wiped before each run so the CSV and the upload
//! only see files belonging to the current run (the WebDAV PUT overwrites
//! blindly, so fewer stale files means fewer redundant uploads).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Delete the download folder when it exists and is non-empty.
///
/// Returns true when a folder was actually deleted.
pub fn reset_download_folder(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        debug!("no download folder at {:?}, nothing to delete", path);
        return Ok(false);
    }

    let is_empty = fs::read_dir(path)
        .with_context(|| format!("failed to inspect download folder {:?}", path))?
        .next()
        .is_none();
    if is_empty {
        debug!("download folder {:?} is empty, keeping it", path);
        return Ok(false);
    }

    fs::remove_dir_all(path)
        .with_context(|| format!("failed to delete download folder {:?}", path))?;
    info!("deleted existing download folder {:?}", path);
    Ok(true)
}

/// Collect all files below `root` (recursive), sorted for stable ordering.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, &mut files, &mut Vec::new())?;
    files.sort();
    Ok(files)
}

/// Collect all directories below `root` (recursive, excluding `root`),
/// sorted so parents come before children.
pub fn collect_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    walk(root, &mut Vec::new(), &mut dirs)?;
    dirs.sort();
    Ok(dirs)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>, dirs: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {:?}", dir))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path.clone());
            walk(&path, files, dirs)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
