//! File system utilities for package assembly.
//!
//! Provides file operations with automatic directory creation and
//! path-annotated errors.

use crate::error::{ErrorExt, PackageError, Result};
use std::fs;
use std::path::Path;

/// Outcome of a create-or-skip write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was missing or empty and has been written
    Written,
    /// The file already had content and was left alone
    Skipped,
}

/// Creates all of the directories of the specified path.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).fs_context("removing directory", path)
    } else {
        Ok(())
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(PackageError::Fs {
            context: "copying file",
            path: from.to_path_buf(),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).fs_context("copying file", from)?;
    Ok(())
}

/// Moves a file, falling back to copy and delete when a rename is not
/// possible (e.g. across filesystems).
///
/// Refuses to replace an existing destination.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(PackageError::Fs {
            context: "moving file onto",
            path: to.to_path_buf(),
            error: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "destination already exists",
            ),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).fs_context("creating directory", dest_dir)?;
    }

    if let Err(e) = fs::rename(from, to) {
        log::debug!(
            "rename {} -> {} failed ({}), copying instead",
            from.display(),
            to.display(),
            e
        );
        copy_file(from, to)?;
        fs::remove_file(from).fs_context("removing moved file", from)?;
    }
    Ok(())
}

/// Whether `path` is missing or has zero length.
///
/// Anything other than a regular file at `path` is an error.
pub fn is_missing_or_empty(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(meta.len() == 0),
        Ok(_) => Err(PackageError::Fs {
            context: "writing file",
            path: path.to_path_buf(),
            error: std::io::Error::other("not a regular file"),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(PackageError::Fs {
            context: "inspecting file",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Writes `contents` only if the target is missing or empty.
pub fn write_if_empty(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if !is_missing_or_empty(path)? {
        log::debug!("{} already has content, skipping", path.display());
        return Ok(WriteOutcome::Skipped);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).fs_context("creating directory", parent)?;
    }
    fs::write(path, contents).fs_context("writing file", path)?;
    Ok(WriteOutcome::Written)
}
