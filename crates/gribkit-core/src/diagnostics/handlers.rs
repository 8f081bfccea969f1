//! Logging handlers and assertion observers
//!
//! Both are injected into a [`Context`](super::Context). Closures with the
//! matching signature implement the traits directly.

use super::Severity;
use gribkit_core_types::schema::EVENT_DIAGNOSTIC;
use std::io::{self, Write};

/// Receives every message logged through a context
pub trait LogHandler: Send + Sync {
    fn log(&self, severity: Severity, message: &str);
}

impl<F> LogHandler for F
where
    F: Fn(Severity, &str) + Send + Sync,
{
    fn log(&self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Observes invariant failures before the error is returned to the caller
///
/// The observer cannot stop the error from propagating; it only decides
/// what else happens (record, alert, count).
pub trait AssertionObserver: Send + Sync {
    fn assertion_failed(&self, message: &str);
}

impl<F> AssertionObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn assertion_failed(&self, message: &str) {
        self(message)
    }
}

/// Writes `SEVERITY: message` lines to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogHandler;

impl StderrLogHandler {
    /// Write one diagnostic line to `writer`
    ///
    /// # Errors
    ///
    /// Propagates the writer's I/O error.
    pub fn write_line<W: Write>(writer: &mut W, severity: Severity, message: &str) -> io::Result<()> {
        writeln!(writer, "{}: {}", severity.name(), message)
    }
}

impl LogHandler for StderrLogHandler {
    fn log(&self, severity: Severity, message: &str) {
        Self::write_line(&mut io::stderr().lock(), severity, message).ok();
    }
}

/// Default handler: forwards to the tracing facility
///
/// Until a global subscriber is installed (for example by
/// `logging_facility::init`) messages go to [`StderrLogHandler`] so nothing
/// is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogHandler;

impl LogHandler for TracingLogHandler {
    fn log(&self, severity: Severity, message: &str) {
        if !tracing::dispatcher::has_been_set() {
            StderrLogHandler.log(severity, message);
            return;
        }
        let severity_name = severity.name();
        match severity {
            Severity::Debug => {
                tracing::debug!(event = EVENT_DIAGNOSTIC, severity = severity_name, "{}", message)
            }
            Severity::Info => {
                tracing::info!(event = EVENT_DIAGNOSTIC, severity = severity_name, "{}", message)
            }
            Severity::Warning => {
                tracing::warn!(event = EVENT_DIAGNOSTIC, severity = severity_name, "{}", message)
            }
            Severity::Error | Severity::Fatal => {
                tracing::error!(event = EVENT_DIAGNOSTIC, severity = severity_name, "{}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_line_carries_severity_and_message() {
        let mut out = Vec::new();
        StderrLogHandler::write_line(&mut out, Severity::Error, "cannot open file").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ERROR: cannot open file\n");
    }

    #[test]
    fn test_closures_are_handlers() {
        let seen = std::sync::Mutex::new(Vec::new());
        let handler = |sev: Severity, msg: &str| seen.lock().unwrap().push((sev, msg.to_string()));
        LogHandler::log(&handler, Severity::Info, "x");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
