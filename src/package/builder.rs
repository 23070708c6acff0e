//! Package assembly orchestration.
//!
//! [`PackageBuilder`] runs the fixed pipeline:
//! 1. Ensure the staging folders exist
//! 2. Discover staged files and validate there is install content
//! 3. Create the output tree and move staged files into it
//! 4. Generate documents and scripts
//! 5. Write the manifest (failures downgrade to warnings)
//! 6. Remove the staging folders
//!
//! Nothing is written to the output tree before step 2 has succeeded.

use crate::error::{ManifestError, PackageError, Result};
use crate::input::PackageMetadata;
use crate::logging::RunLog;
use crate::manifest::{HashBackend, write_manifest};
use crate::package::{PackageContext, PackageLayout, Staging, StagingArea};
use crate::templates::{self, GeneratedFiles};
use crate::utils::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Summary of a completed build
#[derive(Debug)]
pub struct BuildReport {
    /// Final context, with file lists pointing into the package
    pub context: PackageContext,
    /// Document generation outcomes
    pub generated: GeneratedFiles,
    /// Manifest path, or the error that prevented writing it
    pub manifest: std::result::Result<PathBuf, ManifestError>,
    /// Whether the staging folders were removed
    pub staging_removed: bool,
}

impl BuildReport {
    /// Package root folder
    pub fn root(&self) -> &Path {
        &self.context.layout.root
    }

    /// Number of files moved into the package
    pub fn files_moved(&self) -> usize {
        self.context.files().total()
    }
}

/// Assembles one package from the staging folders of a work directory
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    work_dir: PathBuf,
    hash_backend: HashBackend,
    keep_staging: bool,
}

impl PackageBuilder {
    /// Builder for packages under `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            hash_backend: HashBackend::default(),
            keep_staging: false,
        }
    }

    /// Select the manifest hashing backend
    pub fn hash_backend(mut self, backend: HashBackend) -> Self {
        self.hash_backend = backend;
        self
    }

    /// Leave the (now empty) staging folders in place after the build
    pub fn keep_staging(mut self, keep: bool) -> Self {
        self.keep_staging = keep;
        self
    }

    /// Run the full pipeline for `metadata`
    pub fn build(&self, metadata: PackageMetadata, log: &RunLog) -> Result<BuildReport> {
        check_staging_overlap(&self.work_dir, &metadata.name)?;

        let staging = Staging::new(&self.work_dir);
        staging.ensure_folders(log)?;
        let staged = staging.discover(log)?;

        let layout = PackageLayout::new(&self.work_dir, &metadata.name);
        let mut context = PackageContext::new(metadata, layout, staged)?;
        log.info(format!(
            "Building {} ({}) in {}",
            context.name(),
            context.install_mix(),
            context.layout.root.display()
        ));

        if context.layout.root.exists() && !context.layout.root.is_dir() {
            return Err(PackageError::OutputNotDirectory {
                path: context.layout.root.clone(),
            });
        }
        for dir in context.layout.directories() {
            create_dir_all(&dir)?;
        }

        let moved = staging.move_into(context.files(), &context.layout, log)?;
        context.relocate(moved);

        let generated = templates::generate_all(&context, log)?;
        log.info(format!(
            "Generated documents: {} written, {} skipped",
            generated.written(),
            generated.skipped()
        ));

        let manifest = self
            .hash_backend
            .hasher()
            .and_then(|hasher| write_manifest(hasher.as_ref(), &context.layout, log));
        if let Err(e) = &manifest {
            log.warn(format!("Manifest not written: {e}"));
        }

        let staging_removed = if self.keep_staging {
            log.info("Keeping staging folders");
            false
        } else {
            staging.cleanup(log)?;
            true
        };

        Ok(BuildReport {
            context,
            generated,
            manifest,
            staging_removed,
        })
    }
}

/// Refuse package names that would put the package inside, or around, a staging folder
fn check_staging_overlap(work_dir: &Path, name: &str) -> Result<()> {
    let root = work_dir.join(name);
    for area in StagingArea::ALL {
        let staging = area.path_in(work_dir);
        if area.folder_name().eq_ignore_ascii_case(name)
            || root.starts_with(&staging)
            || staging.starts_with(&root)
        {
            return Err(PackageError::OutputOverlapsStaging { path: root, staging });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::test_support::metadata;
    use std::fs;

    fn work_dir_with(files: &[(StagingArea, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for area in StagingArea::ALL {
            fs::create_dir_all(area.path_in(dir.path())).unwrap();
        }
        for (area, name) in files {
            fs::write(area.path_in(dir.path()).join(name), name.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn test_empty_install_fails_before_output() {
        let dir = work_dir_with(&[(StagingArea::RollbackForms, "old.frm")]);
        let err = PackageBuilder::new(dir.path())
            .build(metadata("Acme"), &RunLog::disabled())
            .unwrap_err();
        assert!(matches!(err, PackageError::NoInstallContent));
        assert!(!dir.path().join("Acme").exists());
        assert!(StagingArea::RollbackForms.path_in(dir.path()).join("old.frm").exists());
    }

    #[test]
    fn test_build_moves_and_cleans_up() {
        let dir = work_dir_with(&[
            (StagingArea::InstallForms, "a.frm"),
            (StagingArea::InstallFirmware, "fw.bin"),
        ]);
        let report = PackageBuilder::new(dir.path())
            .build(metadata("Acme"), &RunLog::disabled())
            .unwrap();

        assert_eq!(report.files_moved(), 2);
        assert!(report.root().join("install/Forms/a.frm").is_file());
        assert!(report.root().join("install/Firmware/fw.bin").is_file());
        assert!(report.root().join("rollback/Forms").is_dir());
        assert!(report.manifest.is_ok());
        assert!(report.staging_removed);
        assert!(!StagingArea::InstallForms.path_in(dir.path()).exists());
    }

    #[test]
    fn test_manifest_failure_is_not_fatal() {
        let dir = work_dir_with(&[(StagingArea::InstallForms, "a.frm")]);
        let report = PackageBuilder::new(dir.path())
            .hash_backend(HashBackend::External("no-such-hasher-7c2e".to_string()))
            .keep_staging(true)
            .build(metadata("Acme"), &RunLog::disabled())
            .unwrap();

        assert!(report.manifest.is_err());
        assert!(!report.root().join("Acme.manifest.json").exists());
        assert!(report.root().join("readme.md").is_file());
        assert_eq!(report.generated.written(), 8);
        assert!(StagingArea::InstallForms.path_in(dir.path()).is_dir());
    }

    #[test]
    fn test_staging_folder_name_never_becomes_package_root() {
        let dir = work_dir_with(&[(StagingArea::InstallForms, "a.frm")]);
        for name in ["install-forms", "Install-Forms"] {
            let err = PackageBuilder::new(dir.path())
                .build(metadata(name), &RunLog::disabled())
                .unwrap_err();
            assert!(matches!(err, PackageError::OutputOverlapsStaging { .. }));
        }
        let staged = StagingArea::InstallForms.path_in(dir.path()).join("a.frm");
        assert_eq!(fs::read_to_string(staged).unwrap(), "a.frm");
    }
}
