//! Staging folders: discovery, moving content into the package, cleanup.

use crate::error::{ErrorExt, PackageError, Result};
use crate::logging::RunLog;
use crate::package::layout::{PackageLayout, StagingArea};
use crate::utils::fs::{create_dir_all, move_file, remove_dir_all};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Files found in each staging folder, sorted by file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFiles {
    /// From `install-forms`
    pub install_forms: Vec<PathBuf>,
    /// From `install-firmware`
    pub install_firmware: Vec<PathBuf>,
    /// From `rollback-forms`
    pub rollback_forms: Vec<PathBuf>,
    /// From `rollback-firmware`
    pub rollback_firmware: Vec<PathBuf>,
}

impl StagedFiles {
    /// Files for one area
    pub fn get(&self, area: StagingArea) -> &[PathBuf] {
        match area {
            StagingArea::InstallForms => &self.install_forms,
            StagingArea::InstallFirmware => &self.install_firmware,
            StagingArea::RollbackForms => &self.rollback_forms,
            StagingArea::RollbackFirmware => &self.rollback_firmware,
        }
    }

    fn get_mut(&mut self, area: StagingArea) -> &mut Vec<PathBuf> {
        match area {
            StagingArea::InstallForms => &mut self.install_forms,
            StagingArea::InstallFirmware => &mut self.install_firmware,
            StagingArea::RollbackForms => &mut self.rollback_forms,
            StagingArea::RollbackFirmware => &mut self.rollback_firmware,
        }
    }

    /// Total number of staged files
    pub fn total(&self) -> usize {
        StagingArea::ALL.iter().map(|a| self.get(*a).len()).sum()
    }
}

/// The staging folders of one work directory
#[derive(Debug, Clone)]
pub struct Staging {
    work_dir: PathBuf,
}

impl Staging {
    /// Staging folders under `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Create any missing staging folder.
    ///
    /// Fails with [`PackageError::StagingFoldersMissing`] when at least one
    /// folder had to be created, since a fresh folder cannot hold content yet.
    pub fn ensure_folders(&self, log: &RunLog) -> Result<()> {
        let mut created = Vec::new();
        for area in StagingArea::ALL {
            let path = area.path_in(&self.work_dir);
            if path.is_dir() {
                continue;
            }
            create_dir_all(&path)?;
            log.warn(format!("Created missing staging folder {}", path.display()));
            created.push(path);
        }

        if created.is_empty() {
            Ok(())
        } else {
            Err(PackageError::StagingFoldersMissing { created })
        }
    }

    /// List the regular files directly inside each staging folder
    pub fn discover(&self, log: &RunLog) -> Result<StagedFiles> {
        let mut staged = StagedFiles::default();
        for area in StagingArea::ALL {
            let dir = area.path_in(&self.work_dir);
            let files = staged.get_mut(area);
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                } else {
                    log.warn(format!(
                        "Ignoring non-file entry {} in {}",
                        entry.path().display(),
                        area.folder_name()
                    ));
                }
            }
            log.info(format!("{}: {} file(s)", area.folder_name(), files.len()));
        }
        Ok(staged)
    }

    /// Move every staged file into its destination in `layout`.
    ///
    /// All destinations are checked first, so a clash leaves every staged
    /// file where it was. Returns the staged set re-pointed at the new
    /// locations.
    pub fn move_into(
        &self,
        staged: &StagedFiles,
        layout: &PackageLayout,
        log: &RunLog,
    ) -> Result<StagedFiles> {
        let mut plan = Vec::with_capacity(staged.total());
        for area in StagingArea::ALL {
            let dest_dir = layout.destination(area);
            for from in staged.get(area) {
                let name = from
                    .file_name()
                    .ok_or_else(|| std::io::Error::other("staged path has no file name"))
                    .fs_context("moving staged file", from)?;
                plan.push((area, from, dest_dir.join(name)));
            }
        }

        if let Some((_, _, taken)) = plan.iter().find(|(_, _, to)| to.exists()) {
            return Err(PackageError::Fs {
                context: "moving file onto",
                path: taken.clone(),
                error: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "destination already exists",
                ),
            });
        }

        let mut moved = StagedFiles::default();
        for (area, from, to) in plan {
            move_file(from, &to)?;
            log.info(format!("Moved {} -> {}", from.display(), to.display()));
            moved.get_mut(area).push(to);
        }
        Ok(moved)
    }

    /// Remove the four staging folders
    pub fn cleanup(&self, log: &RunLog) -> Result<()> {
        for area in StagingArea::ALL {
            let path = area.path_in(&self.work_dir);
            remove_dir_all(&path)?;
            log.info(format!("Removed staging folder {}", path.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn staged_work_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for area in StagingArea::ALL {
            fs::create_dir_all(area.path_in(dir.path())).unwrap();
        }
        dir
    }

    #[test]
    fn test_ensure_folders_reports_created() {
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::new(dir.path());
        let err = staging.ensure_folders(&RunLog::disabled()).unwrap_err();
        match err {
            PackageError::StagingFoldersMissing { created } => assert_eq!(created.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
        assert!(staging.ensure_folders(&RunLog::disabled()).is_ok());
    }

    #[test]
    fn test_discover_sorted_top_level_files() {
        let dir = staged_work_dir();
        let forms = StagingArea::InstallForms.path_in(dir.path());
        fs::write(forms.join("b.frm"), "b").unwrap();
        fs::write(forms.join("a.frm"), "a").unwrap();
        fs::create_dir(forms.join("nested")).unwrap();

        let staged = Staging::new(dir.path()).discover(&RunLog::disabled()).unwrap();
        let names: Vec<_> = staged
            .install_forms
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.frm", "b.frm"]);
        assert_eq!(staged.total(), 2);
    }

    #[test]
    fn test_move_into_layout_and_cleanup() {
        let dir = staged_work_dir();
        fs::write(
            StagingArea::RollbackFirmware.path_in(dir.path()).join("fw.bin"),
            "fw",
        )
        .unwrap();

        let staging = Staging::new(dir.path());
        let log = RunLog::disabled();
        let staged = staging.discover(&log).unwrap();
        let layout = PackageLayout::new(dir.path(), "Pkg");
        let moved = staging.move_into(&staged, &layout, &log).unwrap();

        let expected = layout.destination(StagingArea::RollbackFirmware).join("fw.bin");
        assert_eq!(moved.rollback_firmware, vec![expected.clone()]);
        assert_eq!(fs::read_to_string(expected).unwrap(), "fw");

        staging.cleanup(&log).unwrap();
        for area in StagingArea::ALL {
            assert!(!area.path_in(dir.path()).exists());
        }
    }

    #[test]
    fn test_destination_clash_moves_nothing() {
        let dir = staged_work_dir();
        let forms = StagingArea::InstallForms.path_in(dir.path());
        fs::write(forms.join("a.frm"), "a").unwrap();
        fs::write(forms.join("b.frm"), "b-new").unwrap();

        let layout = PackageLayout::new(dir.path(), "Acme");
        let dest = layout.destination(StagingArea::InstallForms);
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("b.frm"), "b-old").unwrap();

        let staging = Staging::new(dir.path());
        let log = RunLog::disabled();
        let staged = staging.discover(&log).unwrap();
        let err = staging.move_into(&staged, &layout, &log).unwrap_err();

        assert!(matches!(err, PackageError::Fs { ref path, .. } if *path == dest.join("b.frm")));
        assert!(forms.join("a.frm").is_file());
        assert!(forms.join("b.frm").is_file());
        assert!(!dest.join("a.frm").exists());
        assert_eq!(fs::read_to_string(dest.join("b.frm")).unwrap(), "b-old");
    }
}
