//! RSO package model and assembly.
//!
//! A package is built from validated input metadata plus the files found in
//! the four staging folders:
//!
//! ```text
//! <work>/
//!   install-forms/  install-firmware/  rollback-forms/  rollback-firmware/
//!   <PackageName>/
//!     readme.md  changelog.txt  <PackageName>.manifest.json
//!     install/{readme.md, install.cmd, Forms/, Firmware/}
//!     rollback/{readme.md, rollback.cmd, Forms/, Firmware/}
//!     scripts/touch.cmd
//!     verify/readme.md
//! ```
//!
//! [`PackageBuilder`] runs the steps in order; [`PackageContext`] carries the
//! state the template generators read.

mod builder;
mod content;
pub mod layout;
pub mod staging;

pub use builder::{BuildReport, PackageBuilder};
pub use content::ContentMix;
pub use layout::{PackageLayout, StagingArea};
pub use staging::{StagedFiles, Staging};

use crate::error::{PackageError, Result};
use crate::input::PackageMetadata;
use std::path::PathBuf;

/// Everything known about the package being assembled
#[derive(Debug, Clone)]
pub struct PackageContext {
    /// Validated input metadata
    pub metadata: PackageMetadata,
    /// Output tree paths
    pub layout: PackageLayout,
    files: StagedFiles,
    install_mix: ContentMix,
}

impl PackageContext {
    /// Build a context, rejecting packages with no install content.
    pub fn new(metadata: PackageMetadata, layout: PackageLayout, files: StagedFiles) -> Result<Self> {
        let install_mix = ContentMix::detect(
            !files.install_forms.is_empty(),
            !files.install_firmware.is_empty(),
        )
        .ok_or(PackageError::NoInstallContent)?;

        Ok(Self {
            metadata,
            layout,
            files,
            install_mix,
        })
    }

    /// Replace file locations after the staged files have been moved
    pub(crate) fn relocate(&mut self, moved: StagedFiles) {
        self.files = moved;
    }

    /// Staged files, at their current location
    pub fn files(&self) -> &StagedFiles {
        &self.files
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Install forms present
    pub fn has_install_forms(&self) -> bool {
        !self.files.install_forms.is_empty()
    }

    /// Install firmware present
    pub fn has_install_firmware(&self) -> bool {
        !self.files.install_firmware.is_empty()
    }

    /// Rollback forms present
    pub fn has_rollback_forms(&self) -> bool {
        !self.files.rollback_forms.is_empty()
    }

    /// Rollback firmware present
    pub fn has_rollback_firmware(&self) -> bool {
        !self.files.rollback_firmware.is_empty()
    }

    /// Content categories being installed. Never "neither".
    pub fn install_mix(&self) -> ContentMix {
        self.install_mix
    }

    /// Content categories available for rollback, if any
    pub fn rollback_mix(&self) -> Option<ContentMix> {
        ContentMix::detect(self.has_rollback_forms(), self.has_rollback_firmware())
    }

    /// Number of files covered by an install mix
    pub fn install_count(&self) -> usize {
        count_for(
            self.install_mix,
            &self.files.install_forms,
            &self.files.install_firmware,
        )
    }

    /// Number of files covered by the rollback mix (0 when none)
    pub fn rollback_count(&self) -> usize {
        self.rollback_mix().map_or(0, |mix| {
            count_for(mix, &self.files.rollback_forms, &self.files.rollback_firmware)
        })
    }
}

fn count_for(mix: ContentMix, forms: &[PathBuf], firmware: &[PathBuf]) -> usize {
    match mix {
        ContentMix::Both => forms.len() + firmware.len(),
        ContentMix::FormsOnly => forms.len(),
        ContentMix::FirmwareOnly => firmware.len(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::Path;

    pub fn metadata(name: &str) -> PackageMetadata {
        PackageMetadata {
            name: name.to_string(),
            date: "2024-01-01".to_string(),
            business_item: "BI-1".to_string(),
            prerequisites: Vec::new(),
            description: "Test package".to_string(),
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/stage").join(n)).collect()
    }

    /// Context with the given file names per category, rooted at `/work`
    pub fn context(
        install_forms: &[&str],
        install_firmware: &[&str],
        rollback_forms: &[&str],
        rollback_firmware: &[&str],
    ) -> PackageContext {
        let files = StagedFiles {
            install_forms: paths(install_forms),
            install_firmware: paths(install_firmware),
            rollback_forms: paths(rollback_forms),
            rollback_firmware: paths(rollback_firmware),
        };
        PackageContext::new(
            metadata("Acme"),
            PackageLayout::new(Path::new("/work"), "Acme"),
            files,
        )
        .unwrap()
    }
}
