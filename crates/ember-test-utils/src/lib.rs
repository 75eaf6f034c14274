//! Test fixtures and mock collaborators for Ember development.
//!
//! Provides owned stand-ins for what a model parser would hand the
//! allocator ([`TensorDef`], [`ModelFixture`]) and a [`RecordingReporter`]
//! that keeps every reported message for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ModelFixture, TensorDef};

use std::fmt;

use ember_core::ErrorReporter;

/// Mock [`ErrorReporter`] that records formatted messages.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in the order they were reported.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&mut self, args: fmt::Arguments<'_>) {
        self.messages.push(args.to_string());
    }
}
