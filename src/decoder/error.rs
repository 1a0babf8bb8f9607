//! Decoder-specific error types
//!
//! Every error here is fatal for the run. ripgrep never emits a malformed
//! line unless its output was cut short, so there is nothing to recover.

use thiserror::Error;

/// Errors produced while reading the ripgrep event stream
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Reading from the underlying stream failed
    #[error("Failed to read search output: {0}")]
    Io(#[from] std::io::Error),

    /// A line was not a valid event record
    #[error("Malformed search output on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field carried a string that is not a number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

impl DecodeError {
    #[must_use]
    pub const fn malformed(line: usize, source: serde_json::Error) -> Self {
        Self::Malformed { line, source }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
