//! Markdown readme files.

use super::{Document, LineEnding, file_names};
use crate::package::layout::{FIRMWARE_DIR, FORMS_DIR};
use crate::package::{ContentMix, PackageContext};
use std::path::PathBuf;

/// Render the package root `readme.md`.
///
/// The rollback section only appears when rollback content was staged.
pub fn render_root(ctx: &PackageContext) -> String {
    let meta = &ctx.metadata;
    let mix = ctx.install_mix();
    let count = ctx.install_count();

    let mut doc = Document::new();
    doc.line(format!("# {}", meta.name))
        .blank()
        .line(&meta.description)
        .blank()
        .line(format!("- Date: {}", meta.date))
        .line(format!("- Business item: {}", meta.business_item))
        .blank()
        .line("## Prerequisites")
        .blank();
    if meta.prerequisites.is_empty() {
        doc.line("None.");
    } else {
        doc.bullets(&meta.prerequisites);
    }

    doc.blank()
        .line("## Contents")
        .blank()
        .line(format!("This package installs {count} {}.", mix.noun(count)))
        .blank();
    contents_table(&mut doc, "install", mix, &ctx.files().install_forms, &ctx.files().install_firmware);

    doc.blank()
        .line("## Installation")
        .blank()
        .line("See [install/readme.md](install/readme.md).")
        .blank()
        .line("## Verification")
        .blank()
        .line("See [verify/readme.md](verify/readme.md).");

    if let Some(rollback) = ctx.rollback_mix() {
        let count = ctx.rollback_count();
        doc.blank()
            .line("## Rollback")
            .blank()
            .line(format!(
                "This package can restore {count} {}. See [rollback/readme.md](rollback/readme.md).",
                rollback.noun(count)
            ));
    }

    doc.finish(LineEnding::Lf)
}

/// Render `install/readme.md`
pub fn render_install(ctx: &PackageContext) -> String {
    let meta = &ctx.metadata;
    let mix = ctx.install_mix();
    let count = ctx.install_count();

    let mut doc = Document::new();
    doc.line(format!("# Install {}", meta.name))
        .blank()
        .line(format!("This folder installs {count} {}.", mix.noun(count)))
        .blank();
    file_sections(&mut doc, mix, &ctx.files().install_forms, &ctx.files().install_firmware);

    doc.line("## Steps")
        .blank()
        .line("1. Copy the whole package folder to the terminal staging host.")
        .line("2. Open a command prompt in the `install` folder.")
        .line("3. Run `install.cmd <terminal staging root>`. The script will:");
    for step in script_steps(mix, count) {
        doc.line(format!("   - {step}"));
    }
    doc.line("4. Check the result as described in [verify/readme.md](../verify/readme.md).");

    doc.finish(LineEnding::Lf)
}

/// Render `rollback/readme.md`
pub fn render_rollback(ctx: &PackageContext) -> String {
    let meta = &ctx.metadata;
    let mut doc = Document::new();
    doc.line(format!("# Roll back {}", meta.name)).blank();

    let Some(mix) = ctx.rollback_mix() else {
        doc.line("No rollback content was supplied with this package.")
            .line("`rollback.cmd` prints a notice and exits without changing the terminal.");
        return doc.finish(LineEnding::Lf);
    };

    let count = ctx.rollback_count();
    doc.line(format!(
        "This folder restores {count} {} replaced by {}.",
        mix.noun(count),
        meta.name
    ))
    .blank();
    file_sections(&mut doc, mix, &ctx.files().rollback_forms, &ctx.files().rollback_firmware);

    doc.line("## Steps")
        .blank()
        .line("1. Open a command prompt in the `rollback` folder.")
        .line("2. Run `rollback.cmd <terminal staging root>`. The script will:");
    for step in script_steps(mix, count) {
        doc.line(format!("   - {step}"));
    }
    doc.line("3. Confirm the terminal reports the previous content.");

    doc.finish(LineEnding::Lf)
}

/// Render `verify/readme.md`
pub fn render_verify(ctx: &PackageContext) -> String {
    let manifest = ctx.layout.manifest_file_name();
    let mut doc = Document::new();
    doc.line(format!("# Verify {}", ctx.name()))
        .blank()
        .line(format!(
            "`{manifest}` in the package root lists a SHA-256 hash for every file in the package."
        ))
        .blank()
        .line("## Steps")
        .blank()
        .line("1. After staging, hash each copied file on the staging host:")
        .blank()
        .line("   ```")
        .line("   certutil -hashfile <file> SHA256")
        .line("   ```")
        .blank()
        .line(format!("2. Compare each hash with the matching entry in `{manifest}`."))
        .line("3. Any mismatch means the copy is incomplete; re-run the install script.");
    doc.finish(LineEnding::Lf)
}

/// Bullet points describing what the install/rollback script does
fn script_steps(mix: ContentMix, count: usize) -> Vec<String> {
    let noun = mix.noun(count);
    let mut steps = Vec::new();
    match mix {
        ContentMix::Both => {
            steps.push(format!("refresh timestamps of the {FORMS_DIR} and {FIRMWARE_DIR} {noun}"));
            steps.push(format!("copy `{FORMS_DIR}` to `<terminal staging root>\\{FORMS_DIR}`"));
            steps.push(format!(
                "copy `{FIRMWARE_DIR}` to `<terminal staging root>\\{FIRMWARE_DIR}`"
            ));
        }
        ContentMix::FormsOnly => {
            steps.push(format!("refresh timestamps of the {noun}"));
            steps.push(format!("copy `{FORMS_DIR}` to `<terminal staging root>\\{FORMS_DIR}`"));
        }
        ContentMix::FirmwareOnly => {
            steps.push(format!("refresh timestamps of the {noun}"));
            steps.push(format!(
                "copy `{FIRMWARE_DIR}` to `<terminal staging root>\\{FIRMWARE_DIR}`"
            ));
        }
    }
    steps
}

/// `### Forms` / `### Firmware` file listings for the categories in `mix`
fn file_sections(doc: &mut Document, mix: ContentMix, forms: &[PathBuf], firmware: &[PathBuf]) {
    doc.line("## Files").blank();
    if mix.has_forms() {
        doc.line(format!("### {FORMS_DIR}")).blank().bullets(file_names(forms)).blank();
    }
    if mix.has_firmware() {
        doc.line(format!("### {FIRMWARE_DIR}"))
            .blank()
            .bullets(file_names(firmware))
            .blank();
    }
}

fn contents_table(
    doc: &mut Document,
    folder: &str,
    mix: ContentMix,
    forms: &[PathBuf],
    firmware: &[PathBuf],
) {
    doc.line("| Folder | Files |").line("|--------|-------|");
    if mix.has_forms() {
        doc.line(format!("| `{folder}/{FORMS_DIR}` | {} |", forms.len()));
    }
    if mix.has_firmware() {
        doc.line(format!("| `{folder}/{FIRMWARE_DIR}` | {} |", firmware.len()));
    }
}
