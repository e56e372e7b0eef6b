//! Reporter - progress ticks, failure summary and benchmark table
//!
//! Every escape sequence goes through [`Palette`], so with colours disabled
//! the output contains no ESC byte at all.

use crate::error::DryRunError;
use crate::options::help_text;
use colored::Color;
use std::io::{self, Write};
use std::time::Duration;

const RESET: &str = "\x1b[0m";

/// Colour gate for a single report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in the SGR codes for `color`, or return it untouched
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            format!("\x1b[{}m{}{}", color.to_fg_str(), text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Writes the report to any output stream
pub struct Reporter<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, colors: bool) -> Self {
        Self {
            out,
            palette: Palette::new(colors),
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Single green dot
    pub fn pass_tick(&mut self) -> io::Result<()> {
        write!(self.out, "{}", self.palette.paint(".", Color::Green))?;
        self.out.flush()
    }

    /// Single red `F`
    pub fn fail_tick(&mut self) -> io::Result<()> {
        write!(self.out, "{}", self.palette.paint("F", Color::Red))?;
        self.out.flush()
    }

    /// Two newlines, closing the tick stream or a report section
    pub fn section_break(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n\n")
    }

    /// `Failures:` header followed by one description per line
    pub fn failures<S: AsRef<str>>(&mut self, descriptions: &[S]) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.paint("Failures: ", Color::Magenta))?;
        for description in descriptions {
            writeln!(
                self.out,
                "{}",
                self.palette.paint(description.as_ref(), Color::Red)
            )?;
        }
        Ok(())
    }

    /// `Benchmarks:` header and the column row
    pub fn bench_header(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.paint("Benchmarks:", Color::Magenta))?;
        self.out.write_all(b"TIME\t\t\tREPETITIONS\tDESCRIPTION\n\n")
    }

    /// One benchmark row: elapsed seconds, repetitions, description
    pub fn bench_row(
        &mut self,
        elapsed: Duration,
        repetitions: u64,
        description: &str,
    ) -> io::Result<()> {
        let seconds = format!("{}s", elapsed.as_secs_f64());
        writeln!(
            self.out,
            "{}\t\t{}\t\t{}",
            self.palette.paint(&seconds, Color::Green),
            repetitions,
            description
        )
    }

    /// Free-form text, used for help and usage errors
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    /// Diagnostic for a rejected argument vector, followed by the help text
    pub fn usage_error(&mut self, err: &DryRunError) -> io::Result<()> {
        writeln!(self.out, "error: {}\n", err)?;
        self.text(&help_text())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
