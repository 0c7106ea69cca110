//! # Rich Query Passthrough
//!
//! Queries go to the ledger unchanged and results come back as raw JSON.

use super::*;
use crate::domain::requests::PageRequest;
use crate::domain::responses::PaginatedQueryResponse;
use crate::ports::inbound::QueryApi;
use id_01_ledger_index::KeyValue;
use serde_json::Value;

/// A JSON string is taken as the query text itself, anything else is
/// serialized.
fn query_text(query: Value) -> String {
    match query {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn decode(entries: Vec<KeyValue>) -> Result<Vec<Value>, IdentityError> {
    entries
        .into_iter()
        .map(|entry| serde_json::from_slice(&entry.value).map_err(IdentityError::from))
        .collect()
}

impl<'a, L, C, P, G> QueryApi for Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    fn query_assets(&self, query: Value) -> Result<Vec<Value>, IdentityError> {
        let query = query_text(query);

        #[cfg(feature = "tracing-log")]
        tracing::debug!(query = %query, "[id-02] query assets");

        decode(self.ledger.rich_query(&query)?)
    }

    fn query_assets_page(
        &self,
        query: Value,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<Value>, IdentityError> {
        let query = query_text(query);

        #[cfg(feature = "tracing-log")]
        tracing::debug!(query = %query, page_size = page.page_size, "[id-02] query assets page");

        let result = self
            .ledger
            .rich_query_paginated(&query, page.page_size, &page.bookmark)?;
        Ok(PaginatedQueryResponse {
            records: decode(result.records)?,
            fetched_records_count: result.metadata.fetched_records_count,
            bookmark: result.metadata.bookmark,
        })
    }
}
