//! Error and abort-signal types for suitetrace

use thiserror::Error;

/// Result type alias for suitetrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// What a check body returns: `Ok(())` for a pass, any `Err` for a failure.
pub type TestResult = Result<()>;

/// Severity of an abort raised inside a check body.
///
/// A `Recoverable` abort fails the current check and lets the run continue;
/// a `Fatal` abort ends the whole run. Under [`Suite::critical`] the
/// distinction disappears: everything is fatal there.
///
/// [`Suite::critical`]: crate::Suite::critical
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current check fails; sibling checks still run.
    Recoverable,
    /// The run ends; no sibling check or group executes afterwards.
    Fatal,
}

/// Abort signal raised from inside a check body.
///
/// Not directly constructible: the only sources are [`Suite::fail`],
/// [`Suite::fatal`] and [`Suite::assert_eq`], so the severity attached to a
/// signal always reflects which of those raised it. Consumed by the
/// enclosing `check`/`critical`/`try_run` boundary; never stored.
///
/// [`Suite::fail`]: crate::Suite::fail
/// [`Suite::fatal`]: crate::Suite::fatal
/// [`Suite::assert_eq`]: crate::Suite::assert_eq
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Abort {
    severity: Severity,
    message: String,
}

impl Abort {
    pub(crate) fn new(severity: Severity, message: impl Into<String>) -> Self {
        Abort {
            severity,
            message: message.into(),
        }
    }

    /// Severity the signal was raised with
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Human-readable description carried by the signal
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Main error type flowing out of check bodies
#[derive(Error, Debug)]
pub enum Error {
    /// Failure reported through the body's return value; recoverable under
    /// `check`, fatal under `critical`
    #[error("{0}")]
    Failure(String),

    /// Abort signal raised via `fail`/`fatal`/`assert_eq`
    #[error(transparent)]
    Abort(#[from] Abort),

    /// Arbitrary error propagated out of a check body with `?`; treated as
    /// a returned failure
    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Severity used when this error escapes a `check` boundary. Only an
    /// explicit Fatal abort escalates; everything else is recoverable.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Abort(abort) => abort.severity(),
            _ => Severity::Recoverable,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Failure(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Failure(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_carries_severity_and_message() {
        let abort = Abort::new(Severity::Fatal, "boom");
        assert_eq!(abort.severity(), Severity::Fatal);
        assert_eq!(abort.message(), "boom");
        assert_eq!(abort.to_string(), "boom");
    }

    #[test]
    fn only_fatal_aborts_escalate() {
        assert_eq!(
            Error::from(Abort::new(Severity::Fatal, "x")).severity(),
            Severity::Fatal
        );
        assert_eq!(
            Error::from(Abort::new(Severity::Recoverable, "x")).severity(),
            Severity::Recoverable
        );
        assert_eq!(Error::from("plain").severity(), Severity::Recoverable);
        assert_eq!(
            Error::External(anyhow::anyhow!("io broke")).severity(),
            Severity::Recoverable
        );
    }

    #[test]
    fn display_passes_message_through() {
        assert_eq!(Error::from("nope".to_string()).to_string(), "nope");
        assert_eq!(
            Error::from(Abort::new(Severity::Recoverable, "later")).to_string(),
            "later"
        );
    }
}
