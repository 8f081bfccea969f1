//! Diagnostics context
//!
//! A [`Context`] carries the logging handler, the assertion observer and the
//! legacy compatibility flag. The host creates one and passes it by
//! reference to the operations that report diagnostics; swapping a handler
//! needs `&mut Context`, so there is no shared mutable state behind the
//! caller's back.
//!
//! Invariant failures never terminate the process. [`Context::assertion_failed`]
//! notifies the observer exactly once and hands back an
//! [`CoreError::AssertionFailed`] for the caller to propagate.

pub mod config;
pub mod handlers;

pub use config::ContextConfig;
pub use handlers::{AssertionObserver, LogHandler, StderrLogHandler, TracingLogHandler};

use crate::errors::{CoreError, Result};
use std::fmt;
use std::sync::Arc;

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution-scoped diagnostics state
#[derive(Clone, Default)]
pub struct Context {
    logging_proc: Option<Arc<dyn LogHandler>>,
    assertion_failed_proc: Option<Arc<dyn AssertionObserver>>,
    gribex_mode: bool,
    debug: bool,
}

impl Context {
    /// Context with default handlers and every flag off
    pub fn new() -> Self {
        Self::default()
    }

    /// Context configured from `config`
    pub fn from_config(config: ContextConfig) -> Self {
        Self {
            gribex_mode: config.gribex_mode,
            debug: config.debug,
            ..Self::default()
        }
    }

    /// Register a logging handler; `None` restores the default
    pub fn set_logging_proc(&mut self, handler: Option<Arc<dyn LogHandler>>) {
        self.logging_proc = handler;
    }

    /// Register an assertion observer; `None` restores the default
    pub fn set_assertion_failed_proc(&mut self, observer: Option<Arc<dyn AssertionObserver>>) {
        self.assertion_failed_proc = observer;
    }

    pub fn has_custom_logging_proc(&self) -> bool {
        self.logging_proc.is_some()
    }

    pub fn has_custom_assertion_failed_proc(&self) -> bool {
        self.assertion_failed_proc.is_some()
    }

    /// Route a message to the current logging handler
    ///
    /// Debug messages are dropped unless the context was created with
    /// `debug` enabled. Without a registered handler messages go to
    /// [`TracingLogHandler`], which writes straight to standard error while
    /// no tracing subscriber is installed.
    pub fn log(&self, severity: Severity, message: &str) {
        if severity == Severity::Debug && !self.debug {
            return;
        }
        match &self.logging_proc {
            Some(handler) => handler.log(severity, message),
            None => TracingLogHandler.log(severity, message),
        }
    }

    /// Report an invariant failure
    ///
    /// Notifies the registered observer, or logs at `Fatal` severity when
    /// none is registered, and returns the error the caller must propagate.
    #[must_use]
    pub fn assertion_failed(&self, message: &str) -> CoreError {
        match &self.assertion_failed_proc {
            Some(observer) => observer.assertion_failed(message),
            None => self.log(
                Severity::Fatal,
                &format!("assertion failure: {}", message),
            ),
        }
        CoreError::AssertionFailed {
            message: message.to_string(),
        }
    }

    /// Check an invariant, reporting through [`Context::assertion_failed`] when it fails
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AssertionFailed` when `condition` is false.
    pub fn ensure(&self, condition: bool, message: &str) -> Result<()> {
        if condition {
            Ok(())
        } else {
            Err(self.assertion_failed(message))
        }
    }

    pub fn gribex_mode_on(&mut self) {
        self.gribex_mode = true;
    }

    pub fn gribex_mode_off(&mut self) {
        self.gribex_mode = false;
    }

    pub fn gribex_mode(&self) -> bool {
        self.gribex_mode
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("custom_logging_proc", &self.logging_proc.is_some())
            .field(
                "custom_assertion_failed_proc",
                &self.assertion_failed_proc.is_some(),
            )
            .field("gribex_mode", &self.gribex_mode)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_gribex_mode_toggles() {
        let mut ctx = Context::new();
        assert!(!ctx.gribex_mode());
        ctx.gribex_mode_on();
        assert!(ctx.gribex_mode());
        ctx.gribex_mode_off();
        assert!(!ctx.gribex_mode());
    }

    #[test]
    fn test_debug_messages_need_debug_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut ctx = Context::new();
        ctx.set_logging_proc(Some(Arc::new(move |sev: Severity, msg: &str| {
            sink.lock().unwrap().push((sev, msg.to_string()));
        })));

        ctx.log(Severity::Debug, "hidden");
        ctx.log(Severity::Info, "shown");
        assert_eq!(*seen.lock().unwrap(), vec![(Severity::Info, "shown".to_string())]);

        let mut debug_ctx = Context::from_config(ContextConfig {
            gribex_mode: false,
            debug: true,
        });
        debug_ctx.set_logging_proc(ctx.logging_proc.clone());
        debug_ctx.log(Severity::Debug, "now shown");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_default_assertion_goes_to_logging_proc_as_fatal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut ctx = Context::new();
        ctx.set_logging_proc(Some(Arc::new(move |sev: Severity, msg: &str| {
            sink.lock().unwrap().push((sev, msg.to_string()));
        })));

        let err = ctx.assertion_failed("buffer is empty");
        assert_eq!(
            err,
            CoreError::AssertionFailed {
                message: "buffer is empty".to_string()
            }
        );
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Severity::Fatal);
        assert!(seen[0].1.contains("buffer is empty"));
    }

    #[test]
    fn test_ensure_passes_without_notifying() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let mut ctx = Context::new();
        ctx.set_assertion_failed_proc(Some(Arc::new(move |_: &str| {
            *counter.lock().unwrap() += 1;
        })));

        assert!(ctx.ensure(true, "never").is_ok());
        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(ctx.ensure(false, "always").is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Warning.to_string(), "WARNING");
    }
}
