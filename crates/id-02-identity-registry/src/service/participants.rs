//! # Participant API Implementation
//!
//! Creation and deletion maintain the DID index (one entry per live
//! participant) and the tombstone namespace.

use super::*;
use crate::domain::did::validate_did;
use crate::domain::entities::{Participant, Role, Tombstone};
use crate::domain::requests::{
    FunctionAccessRequest, PageRequest, ParticipantCreateRequest, ParticipantDeleteRequest,
    ParticipantRolesUpdateRequest,
};
use crate::domain::responses::{HistoryRecord, PaginatedQueryResponse, ParticipantResponse};
use crate::domain::value_objects::{function_name, DocType, IndexTag};
use crate::ports::inbound::ParticipantApi;
use id_01_ledger_index::{create_index, delete_index};

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// `NotFound` for the first role ID without a record.
    fn ensure_roles_exist(&self, role_ids: &[String]) -> Result<(), IdentityError> {
        for role_id in role_ids {
            if !self.record_exists(DocType::Role, role_id)? {
                return Err(IdentityError::not_found(DocType::Role.entity(), role_id.as_str()));
            }
        }
        Ok(())
    }

    /// The explicit issuer if one was named, otherwise the default.
    fn select_issuer(&self, issuer_id: &str) -> Result<String, IdentityError> {
        if issuer_id.is_empty() {
            return self
                .default_issuer_ids()?
                .into_iter()
                .next()
                .ok_or(IdentityError::NoDefaultIssuer);
        }
        if !self.record_exists(DocType::Issuer, issuer_id)? {
            return Err(IdentityError::not_found(DocType::Issuer.entity(), issuer_id));
        }
        Ok(issuer_id.to_string())
    }
}

impl<'a, L, C, P, G> ParticipantApi for Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    fn create_participant(
        &mut self,
        request: ParticipantCreateRequest,
    ) -> Result<Participant, IdentityError> {
        self.require_admin()?;
        let owner_org_id = self.caller.org_id()?;

        validate_did(&request.did, &self.service.config.did_method_prefix)?;
        if self.lookup_did(&request.did)?.is_some() {
            return Err(IdentityError::already_exists(
                DocType::Participant.entity(),
                request.did,
            ));
        }

        self.ensure_certificate_unused(DocType::Participant, &request.certificate, None)?;
        let parsed = self.parse_certificate(&request.certificate)?;
        self.ensure_certificate_current(&parsed)?;

        let creator_id = if request.creator_did.is_empty() {
            String::new()
        } else {
            self.require_did(&request.creator_did)?
        };
        let issuer_id = self.select_issuer(&request.issuer_id)?;
        self.ensure_roles_exist(&request.role_ids)?;

        let mut extra_attributes = parsed.extra_attributes();
        extra_attributes.extend(request.extra_attributes);

        let id = self.next_id();
        let participant = Participant {
            doc_type: DocType::Participant.tag().to_string(),
            id: id.clone(),
            did: request.did,
            certificate: request.certificate,
            issuer_id,
            creator_id,
            role_ids: request.role_ids,
            subject_attributes: parsed.subject_attributes(),
            extra_attributes,
            created_at: self.tx_time()?,
            issued_at: parsed.issued_at(),
            expires_at: parsed.expires_at(),
            active: true,
            owner_org_id,
        };

        self.write_record(DocType::Participant, &id, &participant)?;
        create_index(
            &mut *self.ledger,
            IndexTag::ParticipantByDid.tag(),
            &[participant.did.as_str(), id.as_str()],
        )?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            did = %participant.did,
            participant_id = %id,
            issuer_id = %participant.issuer_id,
            "[id-02] participant created"
        );

        Ok(participant)
    }

    fn resolve_did(&self, did: &str) -> Result<String, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %did, "[id-02] resolve DID");

        self.require_did(did)
    }

    fn get_participant(&self, did: &str) -> Result<ParticipantResponse, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %did, "[id-02] get participant");

        let (_, participant) = self.load_participant(did)?;
        if !participant.creator_id.is_empty()
            && !self.record_exists(DocType::Participant, &participant.creator_id)?
        {
            #[cfg(feature = "tracing-log")]
            tracing::warn!(
                did = %did,
                creator_id = %participant.creator_id,
                "[id-02] creator no longer resolvable"
            );
        }
        Ok(ParticipantResponse::from(&participant))
    }

    fn get_participant_record(&self, did: &str) -> Result<Participant, IdentityError> {
        self.require_admin()?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %did, "[id-02] get participant record");

        let (_, participant) = self.load_participant(did)?;
        Ok(participant)
    }

    fn get_participants(&self) -> Result<Vec<ParticipantResponse>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!("[id-02] get participants");

        Ok(self
            .scan_records::<Participant>(DocType::Participant)?
            .iter()
            .map(ParticipantResponse::from)
            .collect())
    }

    fn get_participants_page(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<ParticipantResponse>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(page_size = page.page_size, "[id-02] get participants page");

        let page = self.page_records::<Participant>(DocType::Participant, &page)?;
        Ok(PaginatedQueryResponse {
            records: page.records.iter().map(ParticipantResponse::from).collect(),
            fetched_records_count: page.fetched_records_count,
            bookmark: page.bookmark,
        })
    }

    fn participant_exists(&self, did: &str) -> Result<bool, IdentityError> {
        Ok(self.lookup_did(did)?.is_some())
    }

    fn disarm_participant(&mut self, did: &str) -> Result<Participant, IdentityError> {
        self.require_admin()?;
        let (id, mut participant) = self.load_participant(did)?;
        participant.active = false;
        self.write_record(DocType::Participant, &id, &participant)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(did = %did, participant_id = %id, "[id-02] participant disarmed");

        Ok(participant)
    }

    fn update_participant_roles(
        &mut self,
        request: ParticipantRolesUpdateRequest,
    ) -> Result<Participant, IdentityError> {
        self.require_admin()?;
        let (id, mut participant) = self.load_participant(&request.did)?;
        self.ensure_roles_exist(&request.role_ids)?;
        participant.role_ids = request.role_ids;
        self.write_record(DocType::Participant, &id, &participant)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(did = %request.did, roles = ?participant.role_ids, "[id-02] participant roles replaced");

        Ok(participant)
    }

    fn delete_participant(
        &mut self,
        request: ParticipantDeleteRequest,
    ) -> Result<Tombstone, IdentityError> {
        self.require_admin()?;
        if request.caller_did.is_empty() {
            return Err(IdentityError::malformed("caller DID is required"));
        }

        let (id, participant) = self.load_participant(&request.did)?;
        let caller_org = self.caller.org_id()?;
        if caller_org != participant.owner_org_id {
            return Err(IdentityError::unauthorized(format!(
                "participant {} belongs to {}, caller is from {}",
                request.did, participant.owner_org_id, caller_org
            )));
        }

        let deleting_caller_id = if request.caller_did == request.did {
            id.clone()
        } else {
            self.require_did(&request.caller_did)?
        };

        self.remove_record(DocType::Participant, &id)?;
        delete_index(
            &mut *self.ledger,
            IndexTag::ParticipantByDid.tag(),
            &[request.did.as_str(), id.as_str()],
            true,
        )?;

        let tombstone = Tombstone {
            owner_org_id: participant.owner_org_id,
            deleted_at: self.tx_time()?,
            deleting_caller_id,
        };
        self.write_tombstone(&request.did, &id, &tombstone)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            did = %request.did,
            participant_id = %id,
            caller_id = %tombstone.deleting_caller_id,
            "[id-02] participant deleted"
        );

        Ok(tombstone)
    }

    fn get_participant_history(
        &self,
        did: &str,
    ) -> Result<Vec<HistoryRecord<Participant>>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %did, "[id-02] get participant history");

        let id = self.historical_id(did)?;
        let key = DocType::Participant.primary_key(&id)?;
        self.project_history(&key, || Participant::placeholder(&id, did))
    }

    fn get_tombstones(&self, did: &str) -> Result<Vec<Tombstone>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %did, "[id-02] get tombstones");

        Ok(self
            .tombstones_of(did)?
            .into_iter()
            .map(|(_, tombstone)| tombstone)
            .collect())
    }

    fn check_function_access(&self, request: FunctionAccessRequest) -> Result<(), IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(did = %request.did, function = %request.function, "[id-02] check function access");

        function_name(&request.function)?;
        let (_, participant) = self.load_participant(&request.did)?;
        if !participant.active {
            return Err(IdentityError::unauthorized(format!(
                "participant {} is disarmed",
                request.did
            )));
        }

        for role_id in &participant.role_ids {
            let Some(role) = self.read_record::<Role>(DocType::Role, role_id)? else {
                #[cfg(feature = "tracing-log")]
                tracing::warn!(did = %request.did, role_id = %role_id, "[id-02] participant references a missing role");
                continue;
            };
            if role.function_set.allows(&request.function)? {
                return Ok(());
            }
        }

        Err(IdentityError::unauthorized(format!(
            "participant {} may not call {}",
            request.did, request.function
        )))
    }
}

