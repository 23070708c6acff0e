//! Helper functions for user-facing reporting.

use crate::cli::{Args, OutputManager, RuntimeConfig};
use crate::error::PackageError;
use crate::input::write_sample;
use crate::package::BuildReport;
use std::path::Path;

/// Print the result of a successful build
pub(super) fn print_summary(report: &BuildReport, config: &RuntimeConfig) {
    let output = config.output();
    let ctx = &report.context;

    output.success(&format!(
        "Created RSO package {} ({})",
        ctx.name(),
        ctx.install_mix()
    ));
    output.indent(&format!("📦 {}", report.root().display()));
    output.indent(&format!("{} file(s) moved into the package", report.files_moved()));
    output.indent(&format!(
        "{} document(s) written, {} left unchanged",
        report.generated.written(),
        report.generated.skipped()
    ));

    match &report.manifest {
        Ok(path) => output.indent(&format!("🔐 {}", path.display())),
        Err(e) => output.warn(&format!("Manifest was not generated: {e}")),
    }

    if !report.staging_removed {
        output.info("Staging folders kept (--keep-staging)");
    }
}

/// Show recovery suggestions for a fatal error
pub(super) fn print_recovery(error: &PackageError, config: &RuntimeConfig) {
    let suggestions = error.recovery_suggestions();
    if suggestions.is_empty() {
        return;
    }
    let output = config.output();
    output.eprintln("\n💡 Recovery suggestions:");
    for suggestion in suggestions {
        output.eprintln(&format!("  • {}", suggestion));
    }
}

/// Print the one-line usage string
pub(super) fn print_usage(output: &OutputManager) {
    output.eprintln("");
    output.eprintln(&Args::usage());
}

/// Write a sample input file into `dir`, reporting where it went
pub(crate) fn write_sample_input(dir: &Path, output: &OutputManager) {
    match write_sample(dir) {
        Ok(Some(path)) => output.eprintln(&format!("Sample input written to {}", path.display())),
        Ok(None) => log::debug!("Sample input already present in {}", dir.display()),
        Err(e) => output.warn(&format!("Could not write sample input: {e}")),
    }
}
