//! In-process SHA-256 manifest.

use super::{ManifestHasher, Result};
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Algorithm label written into the manifest
pub const ALGORITHM: &str = "SHA256";

/// Manifest produced by [`BuiltinHasher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    /// Package folder name
    pub package: String,
    /// Hash algorithm
    pub algorithm: String,
    /// One entry per file, sorted by path
    pub files: Vec<FileHash>,
}

/// Hash of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHash {
    /// Path relative to the package root, `/`-separated
    pub path: String,
    /// Upper-case hex digest
    pub hash: String,
    /// Size in bytes
    pub size: u64,
}

/// SHA-256 over every file, no external tools required
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHasher;

impl ManifestHasher for BuiltinHasher {
    fn describe(&self) -> String {
        format!("built-in {ALGORITHM}")
    }

    fn hash_tree(&self, root: &Path, exclude: &Path) -> Result<String> {
        // Sort by path for deterministic ordering
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && entry.path() != exclude {
                entries.push(entry);
            }
        }

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            let rel_path = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let (hash, size) = hash_file(entry.path())?;
            log::debug!("{rel_path}: {hash}");
            files.push(FileHash {
                path: rel_path,
                hash,
                size,
            });
        }

        let package = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = ManifestDocument {
            package,
            algorithm: ALGORITHM.to_string(),
            files,
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}

/// Reads in 8KB chunks and computes the SHA-256 hash and byte count.
fn hash_file(path: &Path) -> Result<(String, u64)> {
    let fs_err = |context: &'static str| {
        move |error| ManifestError::Fs {
            context,
            path: path.to_path_buf(),
            error,
        }
    };

    let mut file = File::open(path).map_err(fs_err("opening file for hashing"))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = file
            .read(&mut buffer)
            .map_err(fs_err("reading file for hash calculation"))?;
        if n == 0 {
            break;
        }
        size += n as u64;
        hasher.update(&buffer[..n]);
    }

    Ok((format!("{:X}", hasher.finalize()), size))
}
