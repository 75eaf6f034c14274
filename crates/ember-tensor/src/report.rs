//! Error reporters.

use std::fmt;

use ember_core::ErrorReporter;

/// Forwards reports to `tracing` at error level under `ember::report`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&mut self, args: fmt::Arguments<'_>) {
        tracing::error!(target: "ember::report", "{}", args);
    }
}

/// Report `err` against `tensor`, then hand it back for returning.
pub(crate) fn report_failure<R, E>(reporter: &mut R, tensor: &str, err: E) -> E
where
    R: ErrorReporter + ?Sized,
    E: fmt::Display,
{
    reporter.report(format_args!("tensor '{tensor}': {err}"));
    err
}
