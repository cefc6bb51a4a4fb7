//! Indented, styled trace output.
//!
//! The printer holds no run state; it formats one line at a time from the
//! text, a semantic style and the indentation depth the suite hands it.
//! Output errors are deliberately ignored: a broken pipe must not turn a
//! passing run into a failing one.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Semantic style of a trace line. The style-to-decoration mapping is a
/// fixed table; callers pick a meaning, not a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Group heading, bold
    Title,
    /// Passing check, `[Done]` tag
    Ok,
    /// Failing check, `[Fail]` tag
    Fail,
    /// Skipped check, `[Skip]` tag with muted text
    Skip,
    /// Auxiliary text, muted
    Info,
    /// Bold text without the heading blank lines (run-end marker)
    PlainBold,
}

impl Style {
    /// Tag color for the outcome styles; `None` for the text-only styles.
    fn tag_color(self) -> Option<Color> {
        match self {
            Style::Ok => Some(Color::Green),
            Style::Fail => Some(Color::Red),
            Style::Skip => Some(Color::Blue),
            _ => None,
        }
    }

    fn tag_label(self) -> &'static str {
        match self {
            Style::Ok => "Done",
            Style::Fail => "Fail",
            Style::Skip => "Skip",
            _ => "",
        }
    }
}

/// Writes trace lines to a [`WriteColor`] sink.
pub struct Printer {
    out: Box<dyn WriteColor>,
}

impl Printer {
    /// Printer over an arbitrary sink. Tests typically pass a
    /// [`termcolor::NoColor`] wrapper around an in-memory buffer.
    pub fn new(out: Box<dyn WriteColor>) -> Self {
        Printer { out }
    }

    /// Printer over stdout with an explicit color choice.
    pub fn stdout(choice: ColorChoice) -> Self {
        Printer::new(Box::new(StandardStream::stdout(choice)))
    }

    /// Printer over stdout; colors only when stdout is a terminal.
    pub fn auto() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Printer::stdout(choice)
    }

    /// Write one line: `indent` leading spaces, then `text` decorated for
    /// `style`, then a newline.
    pub fn render(&mut self, text: &str, style: Style, indent: usize) {
        let _ = write!(self.out, "{:indent$}", "", indent = indent);
        match style {
            Style::Title | Style::PlainBold => {
                let _ = self.out.set_color(ColorSpec::new().set_bold(true));
                let _ = write!(self.out, "{}", text);
                let _ = self.out.reset();
            }
            Style::Ok | Style::Fail => {
                self.tag(style);
                let _ = write!(self.out, "{}", text);
            }
            Style::Skip => {
                self.tag(style);
                self.muted(text);
            }
            Style::Info => self.muted(text),
        }
        let _ = writeln!(self.out);
    }

    /// Write a truly empty line, no indentation prefix.
    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Write a summary counter line: colored `label` (plain when `style` is
    /// `None`), then `: value`.
    pub fn counter(&mut self, label: &str, value: usize, style: Option<Style>, indent: usize) {
        let _ = write!(self.out, "{:indent$}", "", indent = indent);
        match style.and_then(Style::tag_color) {
            Some(color) => {
                let _ = self
                    .out
                    .set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
                let _ = write!(self.out, "{}", label);
                let _ = self.out.reset();
            }
            None => {
                let _ = write!(self.out, "{}", label);
            }
        }
        let _ = writeln!(self.out, ": {}", value);
    }

    fn tag(&mut self, style: Style) {
        let _ = write!(self.out, "[");
        if let Some(color) = style.tag_color() {
            let _ = self
                .out
                .set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
        }
        let _ = write!(self.out, "{}", style.tag_label());
        let _ = self.out.reset();
        let _ = write!(self.out, "] ");
    }

    fn muted(&mut self, text: &str) {
        let _ = self
            .out
            .set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true));
        let _ = write!(self.out, "{}", text);
        let _ = self.out.reset();
    }
}
