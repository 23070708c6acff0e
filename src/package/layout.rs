//! Output tree paths and staging folder names.

use std::path::{Path, PathBuf};

/// Folder for forms under `install/` and `rollback/`
pub const FORMS_DIR: &str = "Forms";
/// Folder for firmware under `install/` and `rollback/`
pub const FIRMWARE_DIR: &str = "Firmware";

/// The four staging folders read from the work directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagingArea {
    /// `install-forms`
    InstallForms,
    /// `install-firmware`
    InstallFirmware,
    /// `rollback-forms`
    RollbackForms,
    /// `rollback-firmware`
    RollbackFirmware,
}

impl StagingArea {
    /// All areas in processing order
    pub const ALL: [StagingArea; 4] = [
        StagingArea::InstallForms,
        StagingArea::InstallFirmware,
        StagingArea::RollbackForms,
        StagingArea::RollbackFirmware,
    ];

    /// Folder name inside the work directory
    pub fn folder_name(self) -> &'static str {
        match self {
            StagingArea::InstallForms => "install-forms",
            StagingArea::InstallFirmware => "install-firmware",
            StagingArea::RollbackForms => "rollback-forms",
            StagingArea::RollbackFirmware => "rollback-firmware",
        }
    }

    /// Staging folder path under `work_dir`
    pub fn path_in(self, work_dir: &Path) -> PathBuf {
        work_dir.join(self.folder_name())
    }
}

/// Resolved paths of one package's output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    /// `<work>/<PackageName>`
    pub root: PathBuf,
    /// `<root>/install`
    pub install_dir: PathBuf,
    /// `<root>/rollback`
    pub rollback_dir: PathBuf,
    /// `<root>/scripts`
    pub scripts_dir: PathBuf,
    /// `<root>/verify`
    pub verify_dir: PathBuf,
    package_name: String,
}

impl PackageLayout {
    /// Resolve the tree for `package_name` under `work_dir`
    pub fn new(work_dir: &Path, package_name: &str) -> Self {
        let root = work_dir.join(package_name);
        Self {
            install_dir: root.join("install"),
            rollback_dir: root.join("rollback"),
            scripts_dir: root.join("scripts"),
            verify_dir: root.join("verify"),
            root,
            package_name: package_name.to_string(),
        }
    }

    /// Destination folder for files from a staging area
    pub fn destination(&self, area: StagingArea) -> PathBuf {
        match area {
            StagingArea::InstallForms => self.install_dir.join(FORMS_DIR),
            StagingArea::InstallFirmware => self.install_dir.join(FIRMWARE_DIR),
            StagingArea::RollbackForms => self.rollback_dir.join(FORMS_DIR),
            StagingArea::RollbackFirmware => self.rollback_dir.join(FIRMWARE_DIR),
        }
    }

    /// Every directory in the tree, parents first
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![
            self.root.clone(),
            self.install_dir.clone(),
            self.rollback_dir.clone(),
            self.scripts_dir.clone(),
            self.verify_dir.clone(),
        ];
        dirs.extend(StagingArea::ALL.iter().map(|area| self.destination(*area)));
        dirs
    }

    /// `<root>/readme.md`
    pub fn root_readme(&self) -> PathBuf {
        self.root.join("readme.md")
    }

    /// `<root>/changelog.txt`
    pub fn changelog(&self) -> PathBuf {
        self.root.join("changelog.txt")
    }

    /// `<root>/install/readme.md`
    pub fn install_readme(&self) -> PathBuf {
        self.install_dir.join("readme.md")
    }

    /// `<root>/install/install.cmd`
    pub fn install_script(&self) -> PathBuf {
        self.install_dir.join("install.cmd")
    }

    /// `<root>/rollback/readme.md`
    pub fn rollback_readme(&self) -> PathBuf {
        self.rollback_dir.join("readme.md")
    }

    /// `<root>/rollback/rollback.cmd`
    pub fn rollback_script(&self) -> PathBuf {
        self.rollback_dir.join("rollback.cmd")
    }

    /// `<root>/scripts/touch.cmd`
    pub fn touch_script(&self) -> PathBuf {
        self.scripts_dir.join("touch.cmd")
    }

    /// `<root>/verify/readme.md`
    pub fn verify_readme(&self) -> PathBuf {
        self.verify_dir.join("readme.md")
    }

    /// `<root>/<PackageName>.manifest.json`
    pub fn manifest(&self) -> PathBuf {
        self.root.join(self.manifest_file_name())
    }

    /// File name of the manifest
    pub fn manifest_file_name(&self) -> String {
        format!("{}.manifest.json", self.package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = PackageLayout::new(Path::new("/work"), "Acme");
        assert_eq!(layout.root, PathBuf::from("/work/Acme"));
        assert_eq!(layout.install_script(), PathBuf::from("/work/Acme/install/install.cmd"));
        assert_eq!(layout.touch_script(), PathBuf::from("/work/Acme/scripts/touch.cmd"));
        assert_eq!(layout.manifest(), PathBuf::from("/work/Acme/Acme.manifest.json"));
        assert_eq!(
            layout.destination(StagingArea::RollbackFirmware),
            PathBuf::from("/work/Acme/rollback/Firmware")
        );
    }

    #[test]
    fn test_directories_start_with_root() {
        let layout = PackageLayout::new(Path::new("/w"), "P");
        let dirs = layout.directories();
        assert_eq!(dirs[0], layout.root);
        assert_eq!(dirs.len(), 9);
    }
}
