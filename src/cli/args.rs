//! Command line argument parsing and runtime configuration.
//!
//! The tool takes a single input file. Everything else has a default that
//! matches the usual layout: staging folders and output next to the
//! executable, a log file under `logs/`, built-in SHA-256 manifest.

use crate::logging::LOG_DIR_NAME;
use crate::manifest::HashBackend;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};

/// Assemble an RSO package from the staging folders
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rso_packager",
    version,
    about = "Assemble an RSO deployment package of terminal forms and firmware",
    long_about = "Assemble an RSO deployment package of terminal forms and firmware.

Files are taken from four folders next to the executable (or --work-dir):
  install-forms  install-firmware  rollback-forms  rollback-firmware

Usage:
  rso_packager package.json
  rso_packager --work-dir D:\\staging package.json
  rso_packager --hash-command \"hashdeep -r -j0\" package.json"
)]
pub struct Args {
    /// Package input file (.json)
    #[arg(index = 1, value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory holding the staging folders and receiving the package
    #[arg(long, value_name = "DIR", env = "RSO_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// External command that hashes the package; the package root is appended
    #[arg(long, value_name = "CMD", env = "RSO_HASH_COMMAND")]
    pub hash_command: Option<String>,

    /// Directory for the run log (default: <work-dir>/logs)
    #[arg(long, value_name = "DIR", conflicts_with = "no_log")]
    pub log_dir: Option<PathBuf>,

    /// Do not write a run log file
    #[arg(long)]
    pub no_log: bool,

    /// Leave the staging folders in place after a successful run
    #[arg(long)]
    pub keep_staging: bool,

    /// Only print errors and warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments without exiting on error
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// One-line usage string
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Staging and output directory
    pub work_dir: PathBuf,
    /// Run log directory, `None` when logging to file is disabled
    pub log_dir: Option<PathBuf>,
    /// Manifest hashing backend
    pub hash_backend: HashBackend,
    /// Skip staging folder removal
    pub keep_staging: bool,
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Resolve configuration, defaulting the work dir to the executable's directory
    pub fn from_args(args: &Args) -> std::io::Result<Self> {
        let work_dir = match &args.work_dir {
            Some(dir) => dir.clone(),
            None => default_work_dir()?,
        };
        Ok(Self::with_work_dir(args, work_dir))
    }

    fn with_work_dir(args: &Args, work_dir: PathBuf) -> Self {
        let log_dir = if args.no_log {
            None
        } else {
            Some(
                args.log_dir
                    .clone()
                    .unwrap_or_else(|| work_dir.join(LOG_DIR_NAME)),
            )
        };

        let hash_backend = match &args.hash_command {
            Some(command) => HashBackend::External(command.clone()),
            None => HashBackend::Builtin,
        };

        Self {
            work_dir,
            log_dir,
            hash_backend,
            keep_staging: args.keep_staging,
            output: super::OutputManager::new(args.quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

/// Directory containing the running executable
pub fn default_work_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
