//! Interface to the host test-reporting facility.

/// The system of record for test outcomes.
///
/// The suite forwards every failure here and delegates run termination:
/// after `record_fatal_failure` the suite stops executing further checks on
/// its own, whether or not the implementation also panics or exits.
pub trait Reporter {
    /// Log a non-fatal failure; the run continues.
    fn record_failure(&mut self, message: &str);

    /// Log a failure that ends the run.
    fn record_fatal_failure(&mut self, message: &str);
}

/// In-memory [`Reporter`] that collects messages for later inspection.
///
/// Rust's test harness has no non-fatal failure primitive, so the usual
/// wiring is to run a suite against a `RecordingReporter` inside a `#[test]`
/// and assert [`is_clean`](RecordingReporter::is_clean) at the end.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    failures: Vec<String>,
    fatal: Option<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-fatal failure messages, in the order they were recorded
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// The message that ended the run, if any
    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    /// True when nothing was recorded at all
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.fatal.is_none()
    }
}

impl Reporter for RecordingReporter {
    fn record_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn record_fatal_failure(&mut self, message: &str) {
        // Only the first fatal ends a run; keep it.
        if self.fatal.is_none() {
            self.fatal = Some(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut reporter = RecordingReporter::new();
        assert!(reporter.is_clean());

        reporter.record_failure("first");
        reporter.record_failure("second");
        assert_eq!(reporter.failures(), ["first", "second"]);
        assert!(reporter.fatal().is_none());
        assert!(!reporter.is_clean());
    }

    #[test]
    fn first_fatal_wins() {
        let mut reporter = RecordingReporter::new();
        reporter.record_fatal_failure("boom");
        reporter.record_fatal_failure("too late");
        assert_eq!(reporter.fatal(), Some("boom"));
    }
}
