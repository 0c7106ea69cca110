//! # History Projection
//!
//! Wraps the ledger's per-key history into `HistoryRecord`s.

use super::*;
use crate::domain::responses::HistoryRecord;
use serde::de::DeserializeOwned;

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// History of `key`, oldest first. Deletions carry `placeholder()` so the
    /// identifying fields are still filled in.
    pub(crate) fn project_history<T, F>(
        &self,
        key: &str,
        placeholder: F,
    ) -> Result<Vec<HistoryRecord<T>>, IdentityError>
    where
        T: DeserializeOwned,
        F: Fn() -> T,
    {
        self.ledger
            .history_of(key)?
            .into_iter()
            .map(|entry| -> Result<HistoryRecord<T>, IdentityError> {
                let record = if entry.is_delete || entry.value.is_empty() {
                    placeholder()
                } else {
                    serde_json::from_slice(&entry.value)?
                };
                Ok(HistoryRecord {
                    tx_id: entry.tx_id,
                    timestamp: entry.timestamp.to_rfc3339()?,
                    record,
                    is_delete: entry.is_delete,
                })
            })
            .collect()
    }
}
