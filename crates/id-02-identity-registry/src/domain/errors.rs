//! # Domain Errors
//!
//! One taxonomy for every registry operation. Ledger errors are folded into
//! it so callers never match on two enums.
//!
//! Any error aborts the whole invocation; the surrounding ledger transaction
//! must then be discarded, which undoes every earlier write of the call.

use id_01_ledger_index::LedgerError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Record, index entry or key absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// DID or certificate collision, or a record created twice.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A composite key decoded to an unexpected attribute count.
    #[error("key {key:?} has {actual} attributes, expected {expected}")]
    InvalidKeyFormat {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Admin or organization-ownership check failed.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Raised at commit time only. The invocation may be retried as a whole.
    #[error("transaction conflict on key {key:?}")]
    ConflictOnCommit { key: String },

    /// Bad bookmark, page size, query, function name or key attribute.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("invalid DID {did:?}: {reason}")]
    InvalidDid { did: String, reason: String },

    /// Undecodable certificate or one outside its validity window.
    #[error("invalid certificate: {reason}")]
    CertificateInvalid { reason: String },

    #[error("there is no default issuer, pass the issuer id explicitly")]
    NoDefaultIssuer,

    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error("ledger failure: {message}")]
    Ledger { message: String },
}

impl IdentityError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        IdentityError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        IdentityError::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        IdentityError::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        IdentityError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, IdentityError::ConflictOnCommit { .. })
    }
}

impl From<LedgerError> for IdentityError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound { key } => IdentityError::NotFound { entity: "key", id: key },
            LedgerError::MalformedInput { reason } => IdentityError::MalformedInput { reason },
            LedgerError::InvalidKeyFormat {
                key,
                expected,
                actual,
            } => IdentityError::InvalidKeyFormat {
                key,
                expected,
                actual,
            },
            LedgerError::ConflictOnCommit { key } => IdentityError::ConflictOnCommit { key },
            LedgerError::Backend { message } => IdentityError::Ledger { message },
        }
    }
}

impl From<serde_json::Error> for IdentityError {
    fn from(err: serde_json::Error) -> Self {
        IdentityError::Serialization {
            message: err.to_string(),
        }
    }
}
