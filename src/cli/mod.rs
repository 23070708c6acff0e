//! Command line interface for rso_packager.
//!
//! Parses arguments, opens the run log, runs the package build and maps the
//! outcome to an exit code: 0 on success (including manifest warnings), 1 on
//! any fatal error.

mod args;
mod commands;
mod output;

pub use args::{Args, RuntimeConfig, default_work_dir};
pub use commands::execute_command;
pub use output::OutputManager;

use clap::error::ErrorKind;

/// Main CLI entry point, returning the process exit code
pub fn run() -> i32 {
    match Args::try_parse_args() {
        Ok(args) => execute_command(&args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            0
        }
        Err(e) => {
            let _ = e.print();
            let output = OutputManager::new(false);
            match default_work_dir() {
                Ok(dir) => commands::write_sample_input(&dir, &output),
                Err(err) => log::debug!("Cannot locate executable directory: {err}"),
            }
            1
        }
    }
}
