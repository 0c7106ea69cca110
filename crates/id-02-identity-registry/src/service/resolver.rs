//! # DID Resolver and Tombstones
//!
//! A live participant is reachable through exactly one index entry
//! `(did.participant:did~uuid, [did, id])`. Deleting it removes that entry and
//! writes a tombstone under `(did.participant~deleted~did, [did, id])`.

use super::*;
use crate::domain::entities::{Participant, Tombstone};
use crate::domain::value_objects::{DocType, IndexTag};
use id_01_ledger_index::{create_composite_key, scan_index, scan_partial_composite_key, CompositeKey};

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// Decoded keys under `(tag, leading)`. Every key must carry the tag's
    /// full attribute count.
    pub(crate) fn index_entries(
        &self,
        tag: IndexTag,
        leading: &[&str],
    ) -> Result<Vec<CompositeKey>, IdentityError> {
        let keys = scan_index(&*self.ledger, tag.tag(), leading)?;
        for key in &keys {
            if key.attributes().len() != tag.arity() {
                return Err(IdentityError::InvalidKeyFormat {
                    key: key.encode(),
                    expected: tag.arity(),
                    actual: key.attributes().len(),
                });
            }
        }
        Ok(keys)
    }

    /// Internal ID `did` maps to, if any.
    pub(crate) fn lookup_did(&self, did: &str) -> Result<Option<String>, IdentityError> {
        let entries = self.index_entries(IndexTag::ParticipantByDid, &[did])?;
        if entries.len() > 1 {
            #[cfg(feature = "tracing-log")]
            tracing::warn!(did = %did, entries = entries.len(), "[id-02] DID resolves to more than one participant");
        }
        match entries.first() {
            Some(key) => Ok(Some(key.attribute(1)?.to_string())),
            None => Ok(None),
        }
    }

    /// Like `lookup_did`, but an unknown DID is `NotFound`.
    pub(crate) fn require_did(&self, did: &str) -> Result<String, IdentityError> {
        self.lookup_did(did)?
            .ok_or_else(|| IdentityError::not_found(DocType::Participant.entity(), did))
    }

    /// Internal ID and record of the live participant behind `did`.
    pub(crate) fn load_participant(&self, did: &str) -> Result<(String, Participant), IdentityError> {
        let id = self.require_did(did)?;
        let participant = self
            .read_record(DocType::Participant, &id)?
            .ok_or_else(|| IdentityError::not_found(DocType::Participant.entity(), did))?;
        Ok((id, participant))
    }

    /// Store the tombstone of participant `id`. A tombstone is written once.
    pub(crate) fn write_tombstone(
        &mut self,
        did: &str,
        id: &str,
        tombstone: &Tombstone,
    ) -> Result<(), IdentityError> {
        let key = create_composite_key(IndexTag::ParticipantDeleted.tag(), &[did, id])?;
        if self.ledger.get(&key)?.is_some() {
            return Err(IdentityError::already_exists("tombstone", format!("{did}/{id}")));
        }
        self.ledger.put(&key, serde_json::to_vec(tombstone)?)?;
        Ok(())
    }

    /// `(participant id, tombstone)` for every deletion of `did`, in key
    /// order.
    pub(crate) fn tombstones_of(&self, did: &str) -> Result<Vec<(String, Tombstone)>, IdentityError> {
        let tag = IndexTag::ParticipantDeleted;
        scan_partial_composite_key(&*self.ledger, tag.tag(), &[did])?
            .into_iter()
            .map(|entry| -> Result<(String, Tombstone), IdentityError> {
                let key = CompositeKey::parse(&entry.key)?;
                if key.attributes().len() != tag.arity() {
                    return Err(IdentityError::InvalidKeyFormat {
                        key: entry.key.clone(),
                        expected: tag.arity(),
                        actual: key.attributes().len(),
                    });
                }
                let tombstone: Tombstone = serde_json::from_slice(&entry.value)?;
                Ok((key.attribute(1)?.to_string(), tombstone))
            })
            .collect()
    }

    /// Internal ID for history lookups: the live participant, otherwise the
    /// most recently deleted one.
    pub(crate) fn historical_id(&self, did: &str) -> Result<String, IdentityError> {
        if let Some(id) = self.lookup_did(did)? {
            return Ok(id);
        }
        self.tombstones_of(did)?
            .into_iter()
            .max_by(|(_, a), (_, b)| a.deleted_at.cmp(&b.deleted_at))
            .map(|(id, _)| id)
            .ok_or_else(|| IdentityError::not_found(DocType::Participant.entity(), did))
    }
}
