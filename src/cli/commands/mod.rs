//! Package command execution.
//!
//! Coordinates input loading, the package build and user feedback, and
//! guarantees the run log is flushed and closed on every exit path.

mod helpers;

pub(crate) use helpers::write_sample_input;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use crate::input::load_metadata;
use crate::logging::RunLog;
use crate::package::{BuildReport, PackageBuilder};
use helpers::{print_recovery, print_summary, print_usage};

/// Execute a packaging run and return the exit code
pub fn execute_command(args: &Args) -> i32 {
    let config = match RuntimeConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            let output = super::OutputManager::new(false);
            output.error(&format!("Cannot determine work directory: {e}"));
            return 1;
        }
    };
    let output = config.output();

    let log = match &config.log_dir {
        Some(dir) => RunLog::open(dir).unwrap_or_else(|e| {
            output.warn(&format!("Run log disabled: {e}"));
            RunLog::disabled()
        }),
        None => RunLog::disabled(),
    };
    log.info(format!(
        "rso_packager {} started with input {}",
        env!("CARGO_PKG_VERSION"),
        args.input.display()
    ));

    let exit_code = match create_package(args, &config, &log) {
        Ok(report) => {
            print_summary(&report, &config);
            log.info("Package created");
            0
        }
        Err(e) => {
            log.error(format!("Package creation failed: {e}"));
            output.error(&format!("Package creation failed: {e}"));
            print_recovery(&e, &config);
            if e.wants_usage() {
                print_usage(output);
                write_sample_input(&config.work_dir, output);
            }
            1
        }
    };

    if let Some(path) = log.path() {
        output.println(&format!("Log: {}", path.display()));
    }
    if let Err(e) = log.close() {
        output.warn(&format!("Failed to flush run log: {e}"));
    }
    exit_code
}

/// Load the input and build the package
fn create_package(args: &Args, config: &RuntimeConfig, log: &RunLog) -> Result<BuildReport> {
    let metadata = load_metadata(&args.input)?;
    log.info(format!(
        "Loaded input for package {} dated {}",
        metadata.name, metadata.date
    ));

    PackageBuilder::new(&config.work_dir)
        .hash_backend(config.hash_backend.clone())
        .keep_staging(config.keep_staging)
        .build(metadata, log)
}
