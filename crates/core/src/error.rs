//! Error types for card issuance
//!
//! This module defines all error types shared by the stores and the engine.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::sequence::SequenceRange;
use std::io;
use thiserror::Error;

/// Result type alias for card issuance operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for card issuance
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected argument (count, balance, number width). Raised before any side effect.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No sequence record is present
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store-level failure that is not a plain I/O error
    #[error("Store error: {0}")]
    Store(String),

    /// Malformed stored row
    #[error("Parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number in the store file
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cards in `range` were committed but the counter was left behind.
    ///
    /// The next run against the same store would reissue `range`.
    #[error("Cards {range} were persisted but the sequence was not advanced: {source}")]
    SequenceNotAdvanced {
        /// Range of sequence values whose cards are already durable
        range: SequenceRange,
        /// Failure reported by the sequence store
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// Create a parse error for a given line
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True for failures of the persistence layer (either store)
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Store(_))
    }
}
