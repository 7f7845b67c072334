//! Filesystem helpers for reorganizing a package folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Remove a file or directory tree; a missing path is not an error
pub fn delete_path(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Names of the entries directly inside `dir`, sorted
pub fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// First subdirectory of `dir` in name order
pub fn first_subdirectory(dir: &Path) -> Result<Option<PathBuf>> {
    for name in entry_names(dir)? {
        let path = dir.join(&name);
        if path.is_dir() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Files in `dir` whose extension matches one of `extensions`, ignoring case
pub fn files_with_extension(dir: &Path, extensions: &[&str]) -> Result<Vec<String>> {
    Ok(entry_names(dir)?
        .into_iter()
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        })
        .filter(|name| dir.join(name).is_file())
        .collect())
}

/// Move a single entry, falling back to copy + delete for files on another device
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    if let Err(e) = fs::rename(from, to) {
        if !from.is_file() {
            return Err(e.into());
        }
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

/// Move every entry of `from` accepted by `filter` into `to`; returns the moved names
pub fn move_contents<F>(from: &Path, to: &Path, filter: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> bool,
{
    let mut moved = Vec::new();
    for name in entry_names(from)? {
        if !filter(&name) {
            continue;
        }
        move_path(&from.join(&name), &to.join(&name))?;
        moved.push(name);
    }
    Ok(moved)
}
