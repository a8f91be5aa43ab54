//! Error types for record storage.
//!
//! Every storage operation returns [`StoreError`] on failure. No layer of the
//! crate catches or retries: connection, binding, statement, and row-decoding
//! failures all surface to the immediate caller with the driver's or parser's
//! own description attached.

use thiserror::Error;

/// Errors that can occur while talking to the backing SQLite file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying driver failed: bad database path, parameter binding,
    /// malformed SQL, or a constraint violation.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A materialized value did not have the SQLite type the record mapping
    /// expected.
    #[error("column {column}: expected {expected}")]
    Decode {
        column: &'static str,
        expected: &'static str,
    },

    /// A stored date/time column could not be parsed back into a timestamp.
    #[error("column {column}: unparsable timestamp {value:?}: {source}")]
    Timestamp {
        column: &'static str,
        value: String,
        source: chrono::ParseError,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StoreError>;
