//! # Domain Errors
//!
//! Error type shared by the key codec, the index maintainer and every
//! `LedgerStore` implementation.

use thiserror::Error;

/// Errors raised by the ledger and the primitives built directly on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A key that was required to exist is absent.
    #[error("key not found: {key:?}")]
    NotFound { key: String },

    /// Bad bookmark, page size, query or composite-key attribute.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A composite key split into a different number of attributes than the
    /// caller expects for its tag.
    #[error("composite key {key:?} has {actual} attributes, expected {expected}")]
    InvalidKeyFormat {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Another transaction committed a change to something this transaction
    /// read. Nothing was applied; the caller may retry.
    #[error("transaction conflict on key {key:?}")]
    ConflictOnCommit { key: String },

    /// Storage backend failure.
    #[error("ledger backend failure: {message}")]
    Backend { message: String },
}

impl LedgerError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        LedgerError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        LedgerError::NotFound { key: key.into() }
    }

    /// True for the one error kind a caller may resolve by re-running the
    /// whole invocation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::ConflictOnCommit { .. })
    }
}
