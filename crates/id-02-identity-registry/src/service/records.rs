//! # Record Store Helpers
//!
//! Typed JSON access to primary records keyed `(docType, id)`.

use super::*;
use crate::domain::requests::PageRequest;
use crate::domain::responses::PaginatedQueryResponse;
use crate::domain::value_objects::DocType;
use serde::de::DeserializeOwned;
use serde::Serialize;

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// The record `id` of kind `doc`, if present.
    pub(crate) fn read_record<T>(&self, doc: DocType, id: &str) -> Result<Option<T>, IdentityError>
    where
        T: DeserializeOwned,
    {
        let key = doc.primary_key(id)?;
        match self.ledger.get(&key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Like `read_record`, but absence is `NotFound`.
    pub(crate) fn load_record<T>(&self, doc: DocType, id: &str) -> Result<T, IdentityError>
    where
        T: DeserializeOwned,
    {
        self.read_record(doc, id)?
            .ok_or_else(|| IdentityError::not_found(doc.entity(), id))
    }

    pub(crate) fn record_exists(&self, doc: DocType, id: &str) -> Result<bool, IdentityError> {
        let key = doc.primary_key(id)?;
        Ok(self.ledger.get(&key)?.is_some())
    }

    pub(crate) fn write_record<T>(&mut self, doc: DocType, id: &str, record: &T) -> Result<(), IdentityError>
    where
        T: Serialize,
    {
        let key = doc.primary_key(id)?;
        let bytes = serde_json::to_vec(record)?;
        self.ledger.put(&key, bytes)?;
        Ok(())
    }

    /// Delete the record `id`; `NotFound` when it does not exist.
    pub(crate) fn remove_record(&mut self, doc: DocType, id: &str) -> Result<(), IdentityError> {
        let key = doc.primary_key(id)?;
        if self.ledger.get(&key)?.is_none() {
            return Err(IdentityError::not_found(doc.entity(), id));
        }
        self.ledger.delete(&key)?;
        Ok(())
    }

    /// Every record of kind `doc`, in key order.
    pub(crate) fn scan_records<T>(&self, doc: DocType) -> Result<Vec<T>, IdentityError>
    where
        T: DeserializeOwned,
    {
        let prefix = doc.all_records_prefix()?;
        self.ledger
            .scan_prefix(&prefix)?
            .into_iter()
            .map(|entry| serde_json::from_slice(&entry.value).map_err(IdentityError::from))
            .collect()
    }

    /// One page of records of kind `doc`. Page size and bookmark are
    /// validated by the ledger.
    pub(crate) fn page_records<T>(
        &self,
        doc: DocType,
        page: &PageRequest,
    ) -> Result<PaginatedQueryResponse<T>, IdentityError>
    where
        T: DeserializeOwned,
    {
        let prefix = doc.all_records_prefix()?;
        let page = self
            .ledger
            .scan_prefix_paginated(&prefix, page.page_size, &page.bookmark)?;
        let records = page
            .records
            .into_iter()
            .map(|entry| serde_json::from_slice(&entry.value).map_err(IdentityError::from))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(PaginatedQueryResponse {
            records,
            fetched_records_count: page.metadata.fetched_records_count,
            bookmark: page.metadata.bookmark,
        })
    }
}
