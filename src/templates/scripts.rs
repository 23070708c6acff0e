//! Batch scripts shipped with the package.
//!
//! `install.cmd` and `rollback.cmd` take the terminal staging root as their
//! only argument. For each content category present they refresh file
//! timestamps through `scripts\touch.cmd`, then copy the category folder
//! into the staging root.

use super::{Document, LineEnding};
use crate::package::layout::{FIRMWARE_DIR, FORMS_DIR};
use crate::package::{ContentMix, PackageContext};

/// Which script is being rendered
#[derive(Debug, Clone, Copy)]
enum Phase {
    Install,
    Rollback,
}

impl Phase {
    fn script_name(self) -> &'static str {
        match self {
            Phase::Install => "install.cmd",
            Phase::Rollback => "rollback.cmd",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Phase::Install => "Install",
            Phase::Rollback => "Rollback",
        }
    }
}

/// Render `install/install.cmd`
pub fn render_install(ctx: &PackageContext) -> String {
    let mix = ctx.install_mix();
    let doc = script(ctx, Phase::Install, Some(mix), ctx.install_count());
    doc.finish(LineEnding::CrLf)
}

/// Render `rollback/rollback.cmd`
pub fn render_rollback(ctx: &PackageContext) -> String {
    let doc = script(ctx, Phase::Rollback, ctx.rollback_mix(), ctx.rollback_count());
    doc.finish(LineEnding::CrLf)
}

/// Render `scripts/touch.cmd`
pub fn render_touch() -> String {
    let mut doc = Document::new();
    doc.line("@echo off")
        .line("rem Refreshes the modified time of every file under a folder.")
        .line("if \"%~1\"==\"\" (")
        .line("    echo Usage: touch.cmd ^<folder^>")
        .line("    exit /b 1")
        .line(")")
        .line("if not exist \"%~1\\\" (")
        .line("    echo Folder not found: %~1")
        .line("    exit /b 1")
        .line(")")
        .line("for /r \"%~1\" %%F in (*) do copy /b \"%%F\"+,, \"%%F\" >nul")
        .line("exit /b 0");
    doc.finish(LineEnding::CrLf)
}

/// Escape text for a literal position in a batch line.
///
/// `%` is doubled and the cmd metacharacters get a `^` prefix.
fn cmd_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '%' => out.push_str("%%"),
            '^' | '&' | '|' | '<' | '>' | '(' | ')' => {
                out.push('^');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn script(ctx: &PackageContext, phase: Phase, mix: Option<ContentMix>, count: usize) -> Document {
    let meta = &ctx.metadata;
    let name = cmd_escape(&meta.name);
    let mut doc = Document::new();
    doc.line("@echo off")
        .line(format!("rem RSO Package: {name}"))
        .line(format!(
            "rem {} script, {} ^({}^)",
            phase.verb(),
            cmd_escape(&meta.date),
            cmd_escape(&meta.business_item)
        ))
        .line("setlocal");

    let Some(mix) = mix else {
        doc.line(format!("echo No rollback content was supplied with {name}."))
        .line("endlocal")
        .line("exit /b 0");
        return doc;
    };

    doc.line("if \"%~1\"==\"\" (")
        .line(format!(
            "    echo Usage: {} ^<terminal staging root^>",
            phase.script_name()
        ))
        .line("    exit /b 1")
        .line(")")
        .line("set \"TARGET=%~1\"")
        .line("set \"PKG=%~dp0\"")
        .line("set \"TOUCH=%PKG%..\\scripts\\touch.cmd\"")
        .line(format!(
            "echo {} {} {} from %PKG% to %TARGET%",
            phase.verb(),
            count,
            mix.noun(count)
        ));

    let folders: &[&str] = match mix {
        ContentMix::Both => &[FORMS_DIR, FIRMWARE_DIR],
        ContentMix::FormsOnly => &[FORMS_DIR],
        ContentMix::FirmwareOnly => &[FIRMWARE_DIR],
    };

    for folder in folders {
        doc.line(format!("echo Updating timestamps in {folder}"))
            .line(format!("call \"%TOUCH%\" \"%PKG%{folder}\" || goto :failed"));
    }
    for folder in folders {
        doc.line(format!("echo Copying {folder}"))
            .line(format!(
                "xcopy \"%PKG%{folder}\\*\" \"%TARGET%\\{folder}\\\" /Y /I /Q || goto :failed"
            ));
    }

    doc.line(format!("echo {} complete.", phase.verb()))
        .line("endlocal")
        .line("exit /b 0")
        .blank()
        .line(":failed")
        .line(format!("echo {} failed.", phase.verb()))
        .line("endlocal")
        .line("exit /b 1");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::test_support::context;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_install_both_has_both_touch_and_copy_steps() {
        let text = render_install(&context(&["a.frm"], &["fw.bin"], &[], &[]));
        assert_eq!(count(&text, "call \"%TOUCH%\""), 2);
        assert_eq!(count(&text, "xcopy "), 2);
        assert!(text.contains("call \"%TOUCH%\" \"%PKG%Forms\""));
        assert!(text.contains("call \"%TOUCH%\" \"%PKG%Firmware\""));
        assert!(text.contains("echo Install 2 files"));
    }

    #[test]
    fn test_install_forms_only() {
        let text = render_install(&context(&["a.frm"], &[], &[], &[]));
        assert_eq!(count(&text, "xcopy "), 1);
        assert!(text.contains("%PKG%Forms\\*"));
        assert!(!text.contains("Firmware"));
        assert!(text.contains("echo Install 1 form from"));
    }

    #[test]
    fn test_install_firmware_only() {
        let text = render_install(&context(&[], &["a.bin", "b.bin"], &[], &[]));
        assert!(!text.contains("Forms"));
        assert!(text.contains("echo Install 2 firmware files"));
    }

    #[test]
    fn test_scripts_use_crlf() {
        let text = render_install(&context(&["a.frm"], &[], &[], &[]));
        assert!(text.starts_with("@echo off\r\n"));
        assert!(!text.replace("\r\n", "").contains('\n'));
        assert!(render_touch().ends_with("exit /b 0\r\n"));
    }

    #[test]
    fn test_rollback_without_content_is_noop_script() {
        let text = render_rollback(&context(&["a.frm"], &[], &[], &[]));
        assert!(text.contains("No rollback content"));
        assert!(!text.contains("xcopy"));
        assert!(text.contains("exit /b 0"));
    }

    #[test]
    fn test_rollback_uses_rollback_mix() {
        let text = render_rollback(&context(&["a.frm"], &[], &[], &["old.bin"]));
        assert!(text.contains("%PKG%Firmware\\*"));
        assert!(!text.contains("%PKG%Forms"));
        assert!(text.contains("Usage: rollback.cmd"));
    }

    #[test]
    fn test_package_text_escaped_for_cmd() {
        let mut ctx = context(&["a.frm"], &[], &[], &[]);
        ctx.metadata.name = "R&D 100%".to_string();
        ctx.metadata.business_item = "BI-(7)".to_string();

        let rollback = render_rollback(&ctx);
        assert!(rollback.contains("echo No rollback content was supplied with R^&D 100%%.\r\n"));
        assert!(rollback.contains("rem RSO Package: R^&D 100%%\r\n"));
        assert!(rollback.contains("^(BI-^(7^)^)"));
        assert!(!rollback.contains("R&D"));

        let install = render_install(&ctx);
        assert!(install.contains("rem RSO Package: R^&D 100%%"));
    }

    #[test]
    fn test_cmd_escape_leaves_plain_text() {
        assert_eq!(cmd_escape("Acme 2024-01-01"), "Acme 2024-01-01");
        assert_eq!(cmd_escape("a^b|c<d>"), "a^^b^|c^<d^>");
    }
}
