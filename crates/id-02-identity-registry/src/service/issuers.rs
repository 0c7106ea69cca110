//! # Issuer API Implementation

use super::*;
use crate::domain::entities::Issuer;
use crate::domain::requests::{IssuerCreateRequest, IssuerRenewRequest};
use crate::domain::responses::HistoryRecord;
use crate::domain::value_objects::{DocType, IndexTag};
use crate::ports::inbound::IssuerApi;
use id_01_ledger_index::delete_index;

impl<'a, L, C, P, G> IssuerApi for Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    fn create_issuer(&mut self, request: IssuerCreateRequest) -> Result<Issuer, IdentityError> {
        self.require_admin()?;
        self.ensure_certificate_unused(DocType::Issuer, &request.certificate, None)?;
        let parsed = self.parse_certificate(&request.certificate)?;

        let id = self.next_id();
        let is_default = self.settle_default_issuer(&id, request.is_default)?;

        let name = if request.name.is_empty() {
            parsed.common_name.clone()
        } else {
            request.name
        };
        let issuer = Issuer {
            doc_type: DocType::Issuer.tag().to_string(),
            id: id.clone(),
            name,
            certificate: request.certificate,
            subject_attributes: parsed.subject_attributes(),
            extra_attributes: parsed.extra_attributes(),
            issued_at: parsed.issued_at(),
            expires_at: parsed.expires_at(),
            active: true,
            is_default,
        };
        self.write_record(DocType::Issuer, &id, &issuer)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(issuer_id = %id, name = %issuer.name, is_default, "[id-02] issuer created");

        Ok(issuer)
    }

    fn renew_issuer(&mut self, request: IssuerRenewRequest) -> Result<Issuer, IdentityError> {
        self.require_admin()?;
        let mut issuer: Issuer = self.load_record(DocType::Issuer, &request.id)?;
        self.ensure_certificate_unused(DocType::Issuer, &request.certificate, Some(&request.id))?;
        let parsed = self.parse_certificate(&request.certificate)?;

        issuer.name = parsed.common_name.clone();
        issuer.certificate = request.certificate;
        issuer.subject_attributes = parsed.subject_attributes();
        issuer.extra_attributes = parsed.extra_attributes();
        issuer.issued_at = parsed.issued_at();
        issuer.expires_at = parsed.expires_at();
        self.write_record(DocType::Issuer, &request.id, &issuer)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(issuer_id = %request.id, expires_at = %issuer.expires_at, "[id-02] issuer renewed");

        Ok(issuer)
    }

    fn get_issuer(&self, id: &str) -> Result<Issuer, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(issuer_id = %id, "[id-02] get issuer");

        self.load_record(DocType::Issuer, id)
    }

    fn get_issuers(&self) -> Result<Vec<Issuer>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!("[id-02] get issuers");

        self.scan_records(DocType::Issuer)
    }

    fn get_default_issuer(&self) -> Result<Issuer, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!("[id-02] get default issuer");

        let id = self
            .default_issuer_ids()?
            .into_iter()
            .next()
            .ok_or(IdentityError::NoDefaultIssuer)?;
        self.load_record(DocType::Issuer, &id)
    }

    fn delete_issuer(&mut self, id: &str) -> Result<(), IdentityError> {
        self.require_admin()?;
        self.remove_record(DocType::Issuer, id)?;
        let was_default =
            delete_index(&mut *self.ledger, IndexTag::IssuerByDefault.tag(), &[id], false)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(issuer_id = %id, was_default, "[id-02] issuer deleted");

        #[cfg(not(feature = "tracing-log"))]
        let _ = was_default;

        Ok(())
    }

    fn get_issuer_history(&self, id: &str) -> Result<Vec<HistoryRecord<Issuer>>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(issuer_id = %id, "[id-02] get issuer history");

        let key = DocType::Issuer.primary_key(id)?;
        self.project_history(&key, || Issuer::placeholder(id))
    }
}
