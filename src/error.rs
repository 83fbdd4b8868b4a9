//! # Error Types
//!
//! This module defines the error types used throughout the pclps library.
//!
//! Only conditions that end a conversion job are errors. Everything the
//! filter can shrug off (a misterminated escape, an orientation of 7, a
//! zero line-spacing divisor) is an [`Issue`]: the command is dropped, the
//! job continues, and the issue travels with the dispatch event.

use serde::Serialize;
use thiserror::Error;

/// Process exit status for I/O failures and truncated input.
pub const EXIT_IO: i32 = 1;

/// Process exit status for internal invariant violations.
pub const EXIT_INVARIANT: i32 = 2;

/// Fatal error for a conversion job
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input ended inside an escape sequence or its binary payload
    #[error("unexpected end of input inside an escape sequence")]
    UnexpectedEndOfInput,

    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal state went out of range
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl CoreError {
    /// Exit status the command-line entry point reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::UnexpectedEndOfInput | CoreError::Io(_) => EXIT_IO,
            CoreError::InvariantViolation(_) => EXIT_INVARIANT,
        }
    }
}

/// Recoverable condition met while decoding or dispatching a command.
///
/// The affected command has no effect; conversion carries on with the next
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    /// Parameterized escape ended with a byte outside both terminator ranges
    MalformedEscapeTerminator,
    /// Command is not in the dispatch table
    UnrecognizedCommand,
    /// Parameter value outside the range the command accepts
    InvalidParameterRange,
    /// Rate-style parameter (a divisor) equal to zero
    DegenerateRateParameter,
}
