//! Generated package documents.
//!
//! Every file is rendered from the [`PackageContext`] by a pure function and
//! then written with [`write_if_empty`], so re-running generation over an
//! existing package never overwrites edited files.
//!
//! | File | Renderer |
//! |------|----------|
//! | `changelog.txt` | [`changelog::render`] |
//! | `readme.md` | [`readme::render_root`] |
//! | `install/readme.md` | [`readme::render_install`] |
//! | `rollback/readme.md` | [`readme::render_rollback`] |
//! | `verify/readme.md` | [`readme::render_verify`] |
//! | `install/install.cmd` | [`scripts::render_install`] |
//! | `rollback/rollback.cmd` | [`scripts::render_rollback`] |
//! | `scripts/touch.cmd` | [`scripts::render_touch`] |

pub mod changelog;
pub mod readme;
pub mod scripts;

use crate::error::Result;
use crate::logging::RunLog;
use crate::package::PackageContext;
use crate::utils::fs::{WriteOutcome, write_if_empty};
use std::path::{Path, PathBuf};

/// Line terminator for a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`, used for markdown and text
    Lf,
    /// `\r\n`, used for batch scripts
    CrLf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Line-oriented text builder shared by the renderers
#[derive(Debug, Default)]
pub(crate) struct Document {
    lines: Vec<String>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub(crate) fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.lines.push(format!("- {}", item.as_ref()));
        }
        self
    }

    pub(crate) fn finish(&self, ending: LineEnding) -> String {
        let sep = ending.as_str();
        let mut out = self.lines.join(sep);
        out.push_str(sep);
        out
    }
}

/// File names of a list of paths, for listings
pub(crate) fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect()
}

/// Outcome of generating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Target path
    pub path: PathBuf,
    /// Whether it was written or left alone
    pub outcome: WriteOutcome,
}

/// Outcomes for every generated document, in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Per-file results
    pub files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    /// Number of files written this run
    pub fn written(&self) -> usize {
        self.count(WriteOutcome::Written)
    }

    /// Number of files skipped because they already had content
    pub fn skipped(&self) -> usize {
        self.count(WriteOutcome::Skipped)
    }

    fn count(&self, outcome: WriteOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }
}

/// Render and write every package document
pub fn generate_all(ctx: &PackageContext, log: &RunLog) -> Result<GeneratedFiles> {
    let layout = &ctx.layout;
    let documents = [
        (layout.changelog(), changelog::render(ctx)),
        (layout.touch_script(), scripts::render_touch()),
        (layout.root_readme(), readme::render_root(ctx)),
        (layout.install_readme(), readme::render_install(ctx)),
        (layout.install_script(), scripts::render_install(ctx)),
        (layout.rollback_readme(), readme::render_rollback(ctx)),
        (layout.rollback_script(), scripts::render_rollback(ctx)),
        (layout.verify_readme(), readme::render_verify(ctx)),
    ];

    let mut report = GeneratedFiles::default();
    for (path, contents) in documents {
        let outcome = emit(&path, &contents, log)?;
        report.files.push(GeneratedFile { path, outcome });
    }
    Ok(report)
}

fn emit(path: &Path, contents: &str, log: &RunLog) -> Result<WriteOutcome> {
    let outcome = write_if_empty(path, contents)?;
    match outcome {
        WriteOutcome::Written => log.info(format!("Wrote {}", path.display())),
        WriteOutcome::Skipped => log.info(format!(
            "Skipped {} (already has content)",
            path.display()
        )),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::test_support::metadata;
    use crate::package::{PackageLayout, StagedFiles};
    use std::fs;

    #[test]
    fn test_document_line_endings() {
        let mut doc = Document::new();
        doc.line("a").blank().bullets(["b"]);
        assert_eq!(doc.finish(LineEnding::Lf), "a\n\n- b\n");
        assert_eq!(doc.finish(LineEnding::CrLf), "a\r\n\r\n- b\r\n");
    }

    #[test]
    fn test_generate_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let files = StagedFiles {
            install_forms: vec![dir.path().join("a.frm")],
            ..Default::default()
        };
        let ctx = crate::package::PackageContext::new(
            metadata("Acme"),
            PackageLayout::new(dir.path(), "Acme"),
            files,
        )
        .unwrap();
        let log = RunLog::disabled();

        let first = generate_all(&ctx, &log).unwrap();
        assert_eq!(first.written(), 8);

        let changelog = ctx.layout.changelog();
        fs::write(&changelog, "edited by hand\n").unwrap();
        let second = generate_all(&ctx, &log).unwrap();
        assert_eq!(second.written(), 0);
        assert_eq!(second.skipped(), 8);
        assert_eq!(fs::read_to_string(changelog).unwrap(), "edited by hand\n");
    }
}
