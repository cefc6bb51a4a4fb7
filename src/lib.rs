//! # suitetrace
//!
//! A Rust crate for orchestrating nested test suites on top of a host
//! reporting facility, with severity-classified failures, running counters
//! and a colorized, indented execution trace.
//!
//! A suite is a sequence of named groups and checks. A check body returns
//! `Ok(())` to pass, or fails by returning an error, by raising a
//! recoverable [`Suite::fail`] signal, or by raising a run-ending
//! [`Suite::fatal`] signal. The suite keeps counters, prints one trace line
//! per check, and escalates fatal failures to the [`Reporter`] that owns
//! run termination.

pub mod error;
pub mod printer;
pub mod reporter;
pub mod suite;

pub use error::{Abort, Error, Result, Severity, TestResult};
pub use printer::{Printer, Style};
pub use reporter::{RecordingReporter, Reporter};
pub use suite::{RunSummary, Suite};

// Re-exported so callers can pick a color choice without importing termcolor.
pub use termcolor::ColorChoice;

/// Builder for configuring and running a suite
///
/// This provides a fluent interface over [`Suite`] for the common case of
/// one run from construction to summary.
///
/// # Examples
///
/// ```no_run
/// use suitetrace::{Builder, ColorChoice, RecordingReporter};
///
/// let mut reporter = RecordingReporter::new();
/// let summary = Builder::new()
///     .color(ColorChoice::Always) // handy on CI consoles
///     .run("protocol", &mut reporter, |s| {
///         s.title("handshake", |s| {
///             s.critical("connect", |s| s.assert_eq(1 + 1, 2));
///             s.check("negotiate", |s| {
///                 s.info("optional extension probe");
///                 Ok(())
///             });
///             s.skip("resume", |_| Ok(()));
///         });
///     });
/// assert!(summary.is_success());
/// ```
pub struct Builder {
    printer: Printer,
}

impl Builder {
    /// Builder with the default printer: stdout, colors only on a terminal.
    pub fn new() -> Self {
        Builder {
            printer: Printer::auto(),
        }
    }

    /// Force a color choice for the stdout printer.
    pub fn color(mut self, choice: ColorChoice) -> Self {
        self.printer = Printer::stdout(choice);
        self
    }

    /// Send the trace to an arbitrary sink instead of stdout.
    pub fn writer(mut self, out: Box<dyn termcolor::WriteColor>) -> Self {
        self.printer = Printer::new(out);
        self
    }

    /// Run `body` as a complete suite bound to `reporter` and return the
    /// final counters.
    pub fn run<R: Reporter>(
        self,
        name: &str,
        reporter: &mut R,
        body: impl FnOnce(&mut Suite<'_, R>),
    ) -> RunSummary {
        let mut suite = Suite::with_printer(reporter, self.printer);
        suite.start(name, body)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a suite with the default printer.
///
/// Shorthand for `Builder::new().run(name, reporter, body)`.
pub fn run<R: Reporter>(
    name: &str,
    reporter: &mut R,
    body: impl FnOnce(&mut Suite<'_, R>),
) -> RunSummary {
    Builder::new().run(name, reporter, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn builder_runs_to_summary() {
        let mut reporter = RecordingReporter::new();
        let summary = Builder::new()
            .writer(Box::new(NoColor::new(std::io::sink())))
            .run("smoke", &mut reporter, |s| {
                s.check("passes", |_| Ok(()));
                s.skip("later", |_| Ok(()));
            });

        assert_eq!(
            summary,
            RunSummary {
                passed: 1,
                failed: 0,
                skipped: 1
            }
        );
        assert_eq!(summary.total(), 2);
        assert!(reporter.is_clean());
    }
}
