//! Terminal emitter for source-located errors.
//!
//! Renders a [`PositionalError`] against the module's source text:
//!
//! ```text
//! error: FailureError: assertion failed
//!  --> adder.x:3:5-3:20
//!   |
//! 3 |     assert_eq(sum, 5)
//!   |     ^^^^^^^^^^^^^^^
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::span_utils::LineOffsetTable;
use crate::PositionalError;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Emit `error` with the source lines its span covers.
    ///
    /// Spans running past the end of `source` are clamped to it.
    pub fn emit_positional(
        &mut self,
        path: &Path,
        source: &str,
        error: &PositionalError,
    ) -> io::Result<()> {
        let table = LineOffsetTable::build(source);
        let len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let start = error.span.start.min(len);
        let end = error.span.end.min(len).max(start);
        let (start_line, start_col) = table.offset_to_line_col(source, start);
        let (end_line, end_col) = table.offset_to_line_col(source, end);

        // Header: error: Kind: message
        self.write_colored("error", colors::ERROR)?;
        writeln!(self.writer, ": {}", error.message_with_type())?;

        let gutter = end_line.to_string().len();
        write!(self.writer, "{:gutter$}", "")?;
        self.write_colored("--> ", colors::SECONDARY)?;
        let location = format!(
            "{}:{start_line}:{start_col}-{end_line}:{end_col}",
            path.display()
        );
        self.write_colored(&location, colors::BOLD)?;
        writeln!(self.writer)?;
        self.write_gutter(gutter, None)?;
        writeln!(self.writer)?;

        for line in start_line..=end_line {
            let Some(text) = table.line_text(source, line) else {
                break;
            };
            self.write_gutter(gutter, Some(line))?;
            writeln!(self.writer, " {text}")?;

            if line == start_line {
                let underline = if start_line == end_line {
                    end_col.saturating_sub(start_col)
                } else {
                    let line_chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                    line_chars.saturating_add(1).saturating_sub(start_col)
                };
                let width = underline.max(1) as usize;
                self.write_gutter(gutter, None)?;
                write!(self.writer, " {:pad$}", "", pad = (start_col - 1) as usize)?;
                self.write_colored(&"^".repeat(width), colors::ERROR)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn write_gutter(&mut self, width: usize, line: Option<u32>) -> io::Result<()> {
        let number = line.map(|l| l.to_string()).unwrap_or_default();
        write!(self.writer, "{number:>width$} ")?;
        self.write_colored("|", colors::SECONDARY)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
