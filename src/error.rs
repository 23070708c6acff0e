//! Error types for RSO package assembly.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.
//! Fatal errors abort the run with exit code 1; manifest errors are reported as warnings.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rso_packager operations
pub type Result<T> = std::result::Result<T, PackageError>;

/// Main error type for all rso_packager operations
#[derive(Error, Debug)]
pub enum PackageError {
    /// Input file errors (path, JSON, field validation)
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// One or more staging folders did not exist and were created empty
    #[error("Staging folders were missing and have been created: {}", display_paths(.created))]
    StagingFoldersMissing {
        /// Folders created during this run
        created: Vec<PathBuf>,
    },

    /// Neither install forms nor install firmware were staged
    #[error("No install content: both install-forms and install-firmware are empty")]
    NoInstallContent,

    /// The package folder would coincide with a staging folder
    #[error("Package folder {path} overlaps staging folder {staging}")]
    OutputOverlapsStaging {
        /// Package root
        path: PathBuf,
        /// Staging folder it collides with
        staging: PathBuf,
    },

    /// The package output folder would clobber a non-directory
    #[error("Package output path {path} exists and is not a directory")]
    OutputNotDirectory {
        /// Offending path
        path: PathBuf,
    },

    /// Manifest generation errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "creating install folder")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error walking a directory tree
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors raised while locating, reading, and validating the input file
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file at the given path
    #[error("Input file not found: {path}")]
    NotFound {
        /// Path that was given
        path: PathBuf,
    },

    /// Input path does not end in `.json`
    #[error("Input file must have a .json extension: {path}")]
    NotJson {
        /// Path that was given
        path: PathBuf,
    },

    /// Input file could not be read
    #[error("Failed to read input file {path}: {source}")]
    Unreadable {
        /// Path that was given
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Input file is not a JSON object of the expected shape
    #[error("Failed to parse input file {path}: {source}")]
    Malformed {
        /// Path that was given
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// One or more fields failed validation
    #[error("{} invalid field(s): {}", .0.len(), display_fields(.0))]
    InvalidFields(Vec<FieldError>),
}

/// A single field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    /// JSON field name, e.g. `PACKAGE_NAME`
    pub field: &'static str,
    /// Human readable reason
    pub reason: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Manifest generation errors.
///
/// These never abort a run; the CLI reports them as warnings.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// External hash command was not found on PATH
    #[error("Hash command '{command}' not found: {source}")]
    CommandNotFound {
        /// Command name
        command: String,
        /// Lookup error
        #[source]
        source: which::Error,
    },

    /// External hash command could not be started
    #[error("Failed to run hash command {command}: {source}")]
    SpawnFailed {
        /// Command line
        command: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// External hash command exited unsuccessfully
    #[error("Hash command {command} exited with {status}: {stderr}")]
    CommandFailed {
        /// Command line
        command: String,
        /// Exit status as printed by the OS
        status: String,
        /// Captured stderr
        stderr: String,
    },

    /// Hash command given on the command line was empty
    #[error("Hash command is empty")]
    EmptyCommand,

    /// Reading or writing a file failed while hashing
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation
        context: &'static str,
        /// Path being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Directory walk failed
    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    /// Manifest document could not be serialized
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl PackageError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PackageError::Input(InputError::NotFound { .. } | InputError::NotJson { .. }) => vec![
                "Pass the path of a .json input file as the only argument".to_string(),
                "A sample input file has been written next to the staging folders".to_string(),
            ],
            PackageError::Input(InputError::Malformed { .. }) => vec![
                "Check the input file is a single JSON object".to_string(),
                "Compare it against sample-input.json".to_string(),
            ],
            PackageError::Input(InputError::InvalidFields(fields)) => fields
                .iter()
                .map(|f| format!("Fix field {}: {}", f.field, f.reason))
                .collect(),
            PackageError::StagingFoldersMissing { created } => vec![
                format!(
                    "Copy the package content into the new folders: {}",
                    display_paths(created)
                ),
                "Re-run once install-forms or install-firmware holds at least one file".to_string(),
            ],
            PackageError::NoInstallContent => vec![
                "Place the form files to install in install-forms".to_string(),
                "Place the firmware files to install in install-firmware".to_string(),
            ],
            PackageError::OutputOverlapsStaging { .. } => vec![
                "Choose a PACKAGE_NAME that differs from the staging folder names".to_string(),
            ],
            PackageError::OutputNotDirectory { path } => vec![format!(
                "Remove or rename {} before building the package",
                path.display()
            )],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error should abort the run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PackageError::Manifest(_))
    }

    /// Whether usage text and a sample input file should accompany this error.
    ///
    /// True for input and staging validation failures.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            PackageError::Input(_)
                | PackageError::OutputOverlapsStaging { .. }
                | PackageError::StagingFoldersMissing { .. }
                | PackageError::NoInstallContent
        )
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them for better diagnostics.
///
/// ```no_run
/// use rso_packager::error::{ErrorExt, Result};
/// use std::path::Path;
///
/// fn create_install_dir(path: &Path) -> Result<()> {
///     std::fs::create_dir_all(path).fs_context("creating install folder", path)?;
///     Ok(())
/// }
/// ```
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "moving form".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| PackageError::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_errors_are_not_fatal() {
        let err = PackageError::Manifest(ManifestError::EmptyCommand);
        assert!(!err.is_fatal());
        assert!(PackageError::NoInstallContent.is_fatal());
    }

    #[test]
    fn test_field_errors_listed_in_message() {
        let err = InputError::InvalidFields(vec![
            FieldError::new("PACKAGE_NAME", "must not be empty"),
            FieldError::new("DATE", "expected YYYY-MM-DD"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("2 invalid field(s)"));
        assert!(msg.contains("PACKAGE_NAME: must not be empty"));
        assert!(msg.contains("DATE: expected YYYY-MM-DD"));
    }

    #[test]
    fn test_field_errors_produce_one_suggestion_each() {
        let err = PackageError::Input(InputError::InvalidFields(vec![
            FieldError::new("DATE", "missing"),
            FieldError::new("BUSINESS_ITEM", "missing"),
        ]));
        assert_eq!(err.recovery_suggestions().len(), 2);
        assert!(err.wants_usage());
    }

    #[test]
    fn test_fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading form", "/tmp/a.frm").unwrap_err();
        assert_eq!(err.to_string(), "reading form /tmp/a.frm: gone");
    }
}
