//! Manifest produced by an external hashing command.

use super::{ManifestHasher, Result};
use crate::error::ManifestError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs `<program> <args...> <package root>` and keeps stdout verbatim
#[derive(Debug, Clone)]
pub struct ExternalHasher {
    program: PathBuf,
    args: Vec<String>,
    display: String,
}

impl ExternalHasher {
    /// Parse a whitespace-separated command line and resolve the program on PATH
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let name = parts.next().ok_or(ManifestError::EmptyCommand)?;
        let program = which::which(name).map_err(|source| ManifestError::CommandNotFound {
            command: name.to_string(),
            source,
        })?;
        log::debug!("Resolved hash command {} to {}", name, program.display());

        Ok(Self {
            program,
            args: parts.map(str::to_string).collect(),
            display: command_line.trim().to_string(),
        })
    }
}

impl ManifestHasher for ExternalHasher {
    fn describe(&self) -> String {
        format!("'{}'", self.display)
    }

    fn hash_tree(&self, root: &Path, _exclude: &Path) -> Result<String> {
        // The manifest file is written after the command returns, so it is never in the listing
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(root)
            .current_dir(root)
            .output()
            .map_err(|source| ManifestError::SpawnFailed {
                command: self.display.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ManifestError::CommandFailed {
                command: self.display.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_reported() {
        let err = ExternalHasher::from_command_line("definitely-not-a-real-hasher-1f3a --json")
            .unwrap_err();
        assert!(matches!(err, ManifestError::CommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let hasher = ExternalHasher::from_command_line("echo {\"ok\":true}").unwrap();
        let out = hasher
            .hash_tree(dir.path(), &dir.path().join("x.manifest.json"))
            .unwrap();
        assert_eq!(out, format!("{{\"ok\":true}} {}\n", dir.path().display()));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let hasher = ExternalHasher::from_command_line("false").unwrap();
        let err = hasher
            .hash_tree(dir.path(), &dir.path().join("x.manifest.json"))
            .unwrap_err();
        assert!(matches!(err, ManifestError::CommandFailed { .. }));
    }
}
