//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the registry consumes but does not implement. The ledger
//! port lives in `id-01-ledger-index`.

use crate::domain::errors::IdentityError;
use crate::domain::value_objects::SubjectAttributes;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// CERTIFICATES
// =============================================================================

/// Fields of an X.509 certificate the registry uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    pub common_name: String,
    pub organization: Vec<String>,
    pub country: Vec<String>,
    pub province: Vec<String>,
    pub locality: Vec<String>,
    pub organizational_unit: Vec<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Attributes from the non-standard attribute extension, by name.
    pub attributes: BTreeMap<String, String>,
}

impl ParsedCertificate {
    /// Subject attributes as stored on issuer and participant records.
    /// `dni` and `position` come from the attribute extension.
    pub fn subject_attributes(&self) -> SubjectAttributes {
        let first = |values: &[String]| values.first().cloned().unwrap_or_default();
        let attribute = |name: &str| self.attributes.get(name).cloned().unwrap_or_default();
        SubjectAttributes {
            name: self.common_name.clone(),
            dni: attribute("dni"),
            company: first(&self.organization),
            position: attribute("position"),
            country: first(&self.country),
            province: first(&self.province),
            locality: first(&self.locality),
            organizational_unit: first(&self.organizational_unit),
        }
    }

    /// Extension attributes that have no dedicated subject field.
    pub fn extra_attributes(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "dni" | "position"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn issued_at(&self) -> String {
        self.not_before.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn expires_at(&self) -> String {
        self.not_after.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// True if `at` lies inside `[not_before, not_after]`.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.not_before <= at && at <= self.not_after
    }
}

/// Certificate decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// Not base64, not PEM, or not a certificate.
    Decode { reason: String },
    /// A certificate, but one the parser cannot interpret.
    Unsupported { reason: String },
}

impl fmt::Display for CertificateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateError::Decode { reason } => write!(f, "cannot decode certificate: {}", reason),
            CertificateError::Unsupported { reason } => {
                write!(f, "unsupported certificate: {}", reason)
            }
        }
    }
}

impl std::error::Error for CertificateError {}

impl From<CertificateError> for IdentityError {
    fn from(err: CertificateError) -> Self {
        IdentityError::CertificateInvalid {
            reason: err.to_string(),
        }
    }
}

/// Parses base64-encoded PEM certificates.
pub trait CertificateParser {
    fn parse(&self, certificate: &str) -> Result<ParsedCertificate, CertificateError>;
}

// =============================================================================
// CALLER IDENTITY
// =============================================================================

/// The authenticated submitter of the current invocation.
pub trait CallerIdentity {
    /// True if the caller's certificate carries organizational unit `org_unit`.
    fn is_in_org_unit(&self, org_unit: &str) -> Result<bool, IdentityError>;

    /// Membership service provider ID of the caller's organization.
    fn org_id(&self) -> Result<String, IdentityError>;
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Source of internal entity IDs.
pub trait IdGenerator {
    fn generate(&self) -> String;
}
