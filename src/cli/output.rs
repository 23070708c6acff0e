//! Colored terminal output for packaging runs
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) {
        self.tagged("ℹ", Color::Cyan, false, message, false);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.tagged("✓", Color::Green, true, message, false);
    }

    /// Print a warning message.
    ///
    /// Always shown; quiet mode sends it to stderr instead of stdout.
    pub fn warn(&self, message: &str) {
        if self.quiet {
            let stderr = BufferWriter::stderr(ColorChoice::Auto);
            write_tagged(&stderr, "⚠", Color::Yellow, true, message, true);
        } else {
            write_tagged(&self.bufwtr, "⚠", Color::Yellow, true, message, true);
        }
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        // Try colored output to stderr
        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        self.println(&format!("    {}", message));
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a plain message to stderr, regardless of quiet mode
    pub fn eprintln(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = bufwtr.print(&buffer);
    }

    fn tagged(&self, tag: &str, color: Color, bold: bool, message: &str, tint_message: bool) {
        if self.quiet {
            return;
        }
        write_tagged(&self.bufwtr, tag, color, bold, message, tint_message);
    }
}

fn write_tagged(
    bufwtr: &BufferWriter,
    tag: &str,
    color: Color,
    bold: bool,
    message: &str,
    tint_message: bool,
) {
    let mut buffer = bufwtr.buffer();
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(&mut buffer, "{}", tag);
    let _ = buffer.reset();
    if tint_message {
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)));
    }
    let _ = writeln!(&mut buffer, " {}", message);
    let _ = buffer.reset();
    let _ = bufwtr.print(&buffer);
}
