//! Certificate uniqueness and validity checks.

use super::*;
use crate::domain::value_objects::DocType;
use crate::ports::outbound::ParsedCertificate;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

/// The two fields every certificate-carrying record shares.
#[derive(Deserialize)]
struct CertificateHolder {
    id: String,
    #[serde(rename = "certPem", default)]
    certificate: String,
}

fn decode(certificate: &str) -> Result<Vec<u8>, IdentityError> {
    STANDARD
        .decode(certificate.trim())
        .map_err(|e| IdentityError::CertificateInvalid {
            reason: format!("not base64: {e}"),
        })
}

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// Fail with `AlreadyExists` if a record of kind `doc` other than
    /// `except` holds a certificate with the same decoded bytes.
    pub(crate) fn ensure_certificate_unused(
        &self,
        doc: DocType,
        certificate: &str,
        except: Option<&str>,
    ) -> Result<(), IdentityError> {
        let wanted = decode(certificate)?;
        for holder in self.scan_records::<CertificateHolder>(doc)? {
            if holder.certificate.is_empty() || Some(holder.id.as_str()) == except {
                continue;
            }
            // Unreadable stored certificates cannot collide with a valid one.
            let Ok(stored) = STANDARD.decode(holder.certificate.trim()) else {
                continue;
            };
            if stored == wanted {
                return Err(IdentityError::already_exists(
                    "certificate",
                    format!("{} {}", doc.entity(), holder.id),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn parse_certificate(&self, certificate: &str) -> Result<ParsedCertificate, IdentityError> {
        Ok(self.service.certificates.parse(certificate)?)
    }

    /// `CertificateInvalid` unless the transaction timestamp lies inside the
    /// certificate's validity window. No-op when enforcement is off.
    pub(crate) fn ensure_certificate_current(
        &self,
        parsed: &ParsedCertificate,
    ) -> Result<(), IdentityError> {
        if !self.service.config.enforce_certificate_validity {
            return Ok(());
        }
        let now = self.ledger.tx_timestamp().to_datetime()?;
        if parsed.is_valid_at(now) {
            Ok(())
        } else {
            Err(IdentityError::CertificateInvalid {
                reason: format!(
                    "certificate valid from {} to {}, transaction at {}",
                    parsed.issued_at(),
                    parsed.expires_at(),
                    self.tx_time()?
                ),
            })
        }
    }
}
