//! Certificate parser backed by a lookup table.
//!
//! Hosts that already decode client certificates (the ledger peer does)
//! register the decoded fields under the certificate text the registry will
//! be handed. Clones share one table, so certificates registered after the
//! service was built are visible to it.

use crate::ports::outbound::{CertificateError, CertificateParser, ParsedCertificate};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct StaticCertificateParser {
    known: Arc<RwLock<HashMap<String, ParsedCertificate>>>,
}

impl StaticCertificateParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the decoded form of the base64-encoded `certificate`.
    pub fn with_certificate(self, certificate: impl Into<String>, parsed: ParsedCertificate) -> Self {
        self.insert(certificate, parsed);
        self
    }

    pub fn insert(&self, certificate: impl Into<String>, parsed: ParsedCertificate) {
        self.known.write().insert(certificate.into(), parsed);
    }

    pub fn len(&self) -> usize {
        self.known.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.read().is_empty()
    }
}

impl CertificateParser for StaticCertificateParser {
    fn parse(&self, certificate: &str) -> Result<ParsedCertificate, CertificateError> {
        let pem = STANDARD
            .decode(certificate.trim())
            .map_err(|e| CertificateError::Decode {
                reason: format!("not base64: {e}"),
            })?;
        if !pem.starts_with(b"-----BEGIN CERTIFICATE-----") {
            return Err(CertificateError::Decode {
                reason: "missing PEM certificate header".to_string(),
            });
        }
        self.known
            .read()
            .get(certificate.trim())
            .cloned()
            .ok_or_else(|| CertificateError::Unsupported {
                reason: "certificate was not registered with this parser".to_string(),
            })
    }
}
