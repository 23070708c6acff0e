//! Package content manifest.
//!
//! The manifest lists a hash for every file under the package root and is
//! written to `<PackageName>.manifest.json`. Hashing goes through the
//! [`ManifestHasher`] seam:
//!
//! - [`BuiltinHasher`] walks the tree and hashes each file with SHA-256.
//! - [`ExternalHasher`] runs a user-supplied command with the package root as
//!   its last argument and stores its stdout verbatim.
//!
//! Manifest failures are never fatal to a run; callers report them as
//! warnings and leave the rest of the package untouched.

mod builtin;
mod external;

pub use builtin::{BuiltinHasher, FileHash, ManifestDocument};
pub use external::ExternalHasher;

use crate::error::ManifestError;
use crate::logging::RunLog;
use crate::package::PackageLayout;
use std::path::{Path, PathBuf};

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Produces manifest text for a package tree
pub trait ManifestHasher {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Hash every file under `root` except `exclude`, returning the manifest body
    fn hash_tree(&self, root: &Path, exclude: &Path) -> Result<String>;
}

/// Hasher selection made on the command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HashBackend {
    /// In-process SHA-256
    #[default]
    Builtin,
    /// External command line, split on whitespace
    External(String),
}

impl HashBackend {
    /// Build the hasher for this backend
    pub fn hasher(&self) -> Result<Box<dyn ManifestHasher>> {
        match self {
            HashBackend::Builtin => Ok(Box::new(BuiltinHasher)),
            HashBackend::External(command) => Ok(Box::new(ExternalHasher::from_command_line(command)?)),
        }
    }
}

/// Hash the package and write `<PackageName>.manifest.json`.
///
/// Nothing is written when hashing fails, so a failure leaves the package as it was.
pub fn write_manifest(
    hasher: &dyn ManifestHasher,
    layout: &PackageLayout,
    log: &RunLog,
) -> Result<PathBuf> {
    let manifest_path = layout.manifest();
    log.info(format!(
        "Hashing {} with {}",
        layout.root.display(),
        hasher.describe()
    ));

    let body = hasher.hash_tree(&layout.root, &manifest_path)?;
    std::fs::write(&manifest_path, body).map_err(|error| ManifestError::Fs {
        context: "writing manifest",
        path: manifest_path.clone(),
        error,
    })?;

    log.info(format!("Wrote manifest {}", manifest_path.display()));
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct FailingHasher;

    impl ManifestHasher for FailingHasher {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn hash_tree(&self, _root: &Path, _exclude: &Path) -> Result<String> {
            Err(ManifestError::EmptyCommand)
        }
    }

    #[test]
    fn test_failed_hash_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PackageLayout::new(dir.path(), "Acme");
        fs::create_dir_all(&layout.root).unwrap();
        fs::write(layout.root_readme(), "# Acme\n").unwrap();

        let result = write_manifest(&FailingHasher, &layout, &RunLog::disabled());
        assert!(result.is_err());
        assert!(!layout.manifest().exists());
        assert_eq!(fs::read_to_string(layout.root_readme()).unwrap(), "# Acme\n");
    }

    #[test]
    fn test_builtin_backend_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PackageLayout::new(dir.path(), "Acme");
        fs::create_dir_all(&layout.root).unwrap();
        fs::write(layout.changelog(), "RSO Package: Acme\n").unwrap();

        let hasher = HashBackend::Builtin.hasher().unwrap();
        let path = write_manifest(hasher.as_ref(), &layout, &RunLog::disabled()).unwrap();
        let doc: ManifestDocument = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.files[0].path, "changelog.txt");
    }

    #[test]
    fn test_empty_external_command_rejected() {
        assert!(matches!(
            HashBackend::External("   ".to_string()).hasher(),
            Err(ManifestError::EmptyCommand)
        ));
    }
}
