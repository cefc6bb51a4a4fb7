//! The suite state machine: nesting, counters, severity classification and
//! fatal-abort propagation.
//!
//! Execution is strictly sequential; one check finishes (including any
//! groups it starts) before the next begins. Check bodies run under
//! `catch_unwind` so that a stray panic in code under test is classified
//! like any other failure instead of tearing through the trace, and group
//! boundaries use the same mechanism to guarantee indentation restore and
//! summary printing on every exit path.

use std::any::Any;
use std::fmt::Debug;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use crate::error::{Abort, Error, Severity, TestResult};
use crate::printer::{Printer, Style};
use crate::reporter::Reporter;

/// Spaces added per nesting level.
const INDENT_STEP: usize = 2;

/// Counter snapshot of a finished (or in-progress) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// True when no check failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// One test run: nesting depth, counters and the reporter binding.
///
/// # Examples
///
/// ```no_run
/// use suitetrace::{RecordingReporter, Suite};
///
/// let mut reporter = RecordingReporter::new();
/// let mut suite = Suite::new(&mut reporter);
/// suite.start("arithmetic", |s| {
///     s.check("addition", |s| s.assert_eq(2 + 2, 4));
///     s.skip("long division", |_| Ok(()));
/// });
/// assert!(reporter.is_clean());
/// ```
pub struct Suite<'r, R: Reporter> {
    reporter: &'r mut R,
    printer: Printer,
    indent: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    aborted: bool,
}

impl<'r, R: Reporter> Suite<'r, R> {
    /// Suite printing to stdout, colors only on a terminal.
    pub fn new(reporter: &'r mut R) -> Self {
        Suite::with_printer(reporter, Printer::auto())
    }

    /// Suite with an explicit printer, e.g. a capture sink or a forced
    /// color choice for CI consoles.
    pub fn with_printer(reporter: &'r mut R, printer: Printer) -> Self {
        Suite {
            reporter,
            printer,
            indent: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            aborted: false,
        }
    }

    /// Number of checks that passed so far
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of checks that failed so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of checks that were skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            passed: self.passed,
            failed: self.failed,
            skipped: self.skipped,
        }
    }

    /// Top-level entry: runs `body` as a titled group, then prints the
    /// summary block. The summary prints exactly once on every exit path,
    /// including a reporter that panics to terminate the run.
    pub fn start(&mut self, name: &str, body: impl FnOnce(&mut Self)) -> RunSummary {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.title(name, body)));
        self.print_summary();
        if let Err(payload) = outcome {
            resume_unwind(payload);
        }
        self.summary()
    }

    /// Named group of checks. Purely organizational: prints the heading,
    /// indents the body by one level, touches no counter. Indentation is
    /// restored even when the body unwinds.
    pub fn title(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        if self.aborted {
            return;
        }
        self.printer.blank();
        self.printer.render(name, Style::Title, self.indent);
        self.printer.blank();

        self.indent += INDENT_STEP;
        let outcome = catch_unwind(AssertUnwindSafe(|| body(self)));
        self.indent -= INDENT_STEP;

        if let Err(payload) = outcome {
            resume_unwind(payload);
        }
    }

    /// Run a single check. A returned failure or a [`fail`](Suite::fail)
    /// signal marks this check failed and lets the run continue; a
    /// [`fatal`](Suite::fatal) signal or a panic in the body ends the run.
    pub fn check(&mut self, name: &str, test: impl FnOnce(&mut Self) -> TestResult) {
        self.run_check(name, test, false);
    }

    /// Run a single check with no recoverable path: any failure, signal or
    /// panic ends the run.
    pub fn critical(&mut self, name: &str, test: impl FnOnce(&mut Self) -> TestResult) {
        self.run_check(name, test, true);
    }

    /// Mark a check as to-be-done-later. `_test` is accepted for symmetry
    /// with `check`/`critical` and never invoked.
    pub fn skip(&mut self, name: &str, _test: impl FnOnce(&mut Self) -> TestResult) {
        if self.aborted {
            return;
        }
        self.skipped += 1;
        self.printer.render(name, Style::Skip, self.indent);
    }

    /// Abort the current check body, failing it but letting the run
    /// continue. Always returns `Err`, so the idiomatic use is
    /// `return s.fail("reason");` or `s.fail("reason")?;`.
    ///
    /// Under [`critical`](Suite::critical) there is no recoverable path and
    /// this still ends the run.
    pub fn fail(&self, message: impl Into<String>) -> TestResult {
        Err(Abort::new(Severity::Recoverable, message).into())
    }

    /// Abort the current check body and end the whole run, under both
    /// `check` and `critical`.
    pub fn fatal(&self, message: impl Into<String>) -> TestResult {
        Err(Abort::new(Severity::Fatal, message).into())
    }

    /// Equality assertion: `PartialEq` comparison, `Debug` formatting in
    /// the mismatch message. A mismatch is a fatal abort.
    pub fn assert_eq<T: PartialEq + Debug>(&self, actual: T, expected: T) -> TestResult {
        if actual == expected {
            Ok(())
        } else {
            Err(Abort::new(
                Severity::Fatal,
                format!("Expect \"{:?}\", got \"{:?}\"", expected, actual),
            )
            .into())
        }
    }

    /// Probe whether `attempt` aborts. Returns `true` on clean completion;
    /// on any `Err` or panic, invokes `on_abort` with the caught error and
    /// returns `false`. Never re-raises.
    pub fn try_run(
        &mut self,
        attempt: impl FnOnce() -> TestResult,
        on_abort: Option<&mut dyn FnMut(&Error)>,
    ) -> bool {
        let caught = match catch_unwind(AssertUnwindSafe(attempt)) {
            Ok(Ok(())) => return true,
            Ok(Err(err)) => err,
            Err(payload) => Abort::new(Severity::Fatal, panic_message(payload)).into(),
        };
        if let Some(handler) = on_abort {
            handler(&caught);
        }
        false
    }

    /// Print `text` in muted style at the current indentation.
    pub fn info(&mut self, text: &str) {
        if self.aborted {
            return;
        }
        self.printer.render(text, Style::Info, self.indent);
    }

    fn run_check(&mut self, name: &str, test: impl FnOnce(&mut Self) -> TestResult, critical: bool) {
        if self.aborted {
            return;
        }
        let outcome = catch_unwind(AssertUnwindSafe(|| test(self)));
        if self.aborted {
            // A check nested in this body already escalated fatally; the
            // body's own outcome no longer counts, prints or reports. A
            // panic still unwinds so group cleanup above us runs.
            if let Err(payload) = outcome {
                resume_unwind(payload);
            }
            return;
        }
        let (message, fatal) = match outcome {
            Ok(Ok(())) => {
                self.passed += 1;
                self.printer.render(name, Style::Ok, self.indent);
                return;
            }
            Ok(Err(err)) => {
                let fatal = critical || err.severity() == Severity::Fatal;
                (err.to_string(), fatal)
            }
            // Unrecognized abnormal exit: never downgraded.
            Err(payload) => (panic_message(payload), true),
        };

        self.failed += 1;
        self.printer.render(name, Style::Fail, self.indent);
        if fatal {
            // The reporter owns actual termination; from here on every
            // operation on this suite is a no-op.
            self.aborted = true;
            self.reporter.record_fatal_failure(&message);
        } else {
            self.reporter.record_failure(&message);
        }
    }

    fn print_summary(&mut self) {
        self.printer.blank();
        self.printer
            .render("=== FINISHED", Style::PlainBold, self.indent);
        self.printer.blank();
        self.printer
            .counter("Passed", self.passed, Some(Style::Ok), self.indent);
        self.printer
            .counter("Failed", self.failed, Some(Style::Fail), self.indent);
        // Historical label, scraped by downstream tooling; do not respell.
        self.printer
            .counter("Skiped", self.skipped, Some(Style::Skip), self.indent);
        self.printer.blank();
        self.printer
            .counter("Total", self.summary().total(), None, self.indent);
        self.printer.blank();
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "check body panicked".to_string()
    }
}
