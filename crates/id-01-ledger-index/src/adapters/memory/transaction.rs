use super::ledger::{CommitReceipt, InMemoryLedger};
use super::query::Selector;
use crate::domain::entities::{HistoryEntry, KeyValue, Page, PageMetadata, TxTimestamp};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::LedgerStore;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};

/// Keys and prefixes a transaction depended on.
#[derive(Debug, Default)]
pub(super) struct ReadSet {
    keys: BTreeSet<String>,
    prefixes: BTreeSet<String>,
}

impl ReadSet {
    /// True if a write to `key` invalidates something this transaction read.
    pub(super) fn covers(&self, key: &str) -> bool {
        self.keys.contains(key) || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// One invocation's view of an [`InMemoryLedger`].
///
/// Dropping a transaction without calling [`commit`](Self::commit) discards
/// every buffered write.
pub struct LedgerTransaction {
    ledger: InMemoryLedger,
    tx_id: String,
    timestamp: TxTimestamp,
    snapshot_height: u64,
    /// `None` marks a pending delete.
    writes: BTreeMap<String, Option<Vec<u8>>>,
    reads: Mutex<ReadSet>,
}

impl std::fmt::Debug for LedgerTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerTransaction")
            .field("tx_id", &self.tx_id)
            .field("snapshot_height", &self.snapshot_height)
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

impl Drop for LedgerTransaction {
    fn drop(&mut self) {
        self.ledger.release_snapshot(self.snapshot_height);
    }
}

impl LedgerTransaction {
    pub(super) fn new(
        ledger: InMemoryLedger,
        tx_id: String,
        timestamp: TxTimestamp,
        snapshot_height: u64,
    ) -> Self {
        Self {
            ledger,
            tx_id,
            timestamp,
            snapshot_height,
            writes: BTreeMap::new(),
            reads: Mutex::new(ReadSet::default()),
        }
    }

    /// Number of buffered writes and deletes.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply every buffered write, or none of them.
    ///
    /// ## Errors
    ///
    /// - `ConflictOnCommit`: a transaction committed after this one began
    ///   changed a key this one read or a key under a prefix it scanned
    pub fn commit(mut self) -> Result<CommitReceipt, LedgerError> {
        let reads = std::mem::take(self.reads.get_mut());
        let writes = std::mem::take(&mut self.writes);
        let tx_id = std::mem::take(&mut self.tx_id);
        self.ledger
            .apply(tx_id, self.timestamp, self.snapshot_height, &reads, writes)
    }

    /// Committed entries under `prefix` from `start` on, overlaid with this
    /// transaction's pending writes.
    fn merged_range(&self, start: &str, prefix: &str) -> BTreeMap<String, Vec<u8>> {
        let mut merged = self.ledger.committed_range(start, prefix);
        for (key, value) in self
            .writes
            .range(start.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged
    }

    fn check_page_size(&self, page_size: i32) -> Result<usize, LedgerError> {
        if page_size <= 0 {
            return Err(LedgerError::malformed(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        if page_size > self.ledger.config().max_page_size {
            return Err(LedgerError::malformed(format!(
                "page size {page_size} exceeds the maximum of {}",
                self.ledger.config().max_page_size
            )));
        }
        Ok(page_size as usize)
    }
}

/// Hex-encoded key of the first record of the next page.
fn encode_bookmark(key: &str) -> String {
    hex::encode(key.as_bytes())
}

/// Resume key for `bookmark`; must lie inside the scanned range.
fn decode_bookmark(bookmark: &str, prefix: &str) -> Result<String, LedgerError> {
    let bytes = hex::decode(bookmark)
        .map_err(|e| LedgerError::malformed(format!("bookmark is not valid: {e}")))?;
    let key = String::from_utf8(bytes)
        .map_err(|_| LedgerError::malformed("bookmark does not decode to a key"))?;
    if !key.starts_with(prefix) {
        return Err(LedgerError::malformed("bookmark is outside the requested range"));
    }
    Ok(key)
}

/// Cut `candidates` (already positioned at the resume key) into one page.
fn paginate<I>(candidates: I, page_size: usize) -> Page
where
    I: Iterator<Item = KeyValue>,
{
    let mut records: Vec<KeyValue> = candidates.take(page_size + 1).collect();
    let bookmark = if records.len() > page_size {
        records
            .pop()
            .map(|next| encode_bookmark(&next.key))
            .unwrap_or_default()
    } else {
        String::new()
    };
    Page {
        metadata: PageMetadata {
            fetched_records_count: records.len() as i32,
            bookmark,
        },
        records,
    }
}

impl LedgerStore for LedgerTransaction {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        self.reads.lock().keys.insert(key.to_string());
        Ok(self.ledger.read_committed(key))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::malformed("key must not be empty"));
        }
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::malformed("key must not be empty"));
        }
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<KeyValue>, LedgerError> {
        self.reads.lock().prefixes.insert(prefix.to_string());
        Ok(self
            .merged_range(prefix, prefix)
            .into_iter()
            .map(|(k, v)| KeyValue::new(k, v))
            .collect())
    }

    fn scan_prefix_paginated(
        &self,
        prefix: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<Page, LedgerError> {
        let page_size = self.check_page_size(page_size)?;
        let start = if bookmark.is_empty() {
            prefix.to_string()
        } else {
            decode_bookmark(bookmark, prefix)?
        };
        self.reads.lock().prefixes.insert(prefix.to_string());

        let candidates = self
            .merged_range(&start, prefix)
            .into_iter()
            .map(|(k, v)| KeyValue::new(k, v));
        Ok(paginate(candidates, page_size))
    }

    fn history_of(&self, key: &str) -> Result<Vec<HistoryEntry>, LedgerError> {
        Ok(self.ledger.committed_history(key))
    }

    // Rich query results are not added to the read set.
    fn rich_query(&self, query: &str) -> Result<Vec<KeyValue>, LedgerError> {
        let selector = Selector::parse(query)?;
        Ok(self
            .merged_range("", "")
            .into_iter()
            .filter(|(_, v)| selector.matches_bytes(v))
            .map(|(k, v)| KeyValue::new(k, v))
            .collect())
    }

    fn rich_query_paginated(
        &self,
        query: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<Page, LedgerError> {
        let selector = Selector::parse(query)?;
        let page_size = self.check_page_size(page_size)?;
        let start = if bookmark.is_empty() {
            String::new()
        } else {
            decode_bookmark(bookmark, "")?
        };

        let candidates = self
            .merged_range(&start, "")
            .into_iter()
            .filter(|(_, v)| selector.matches_bytes(v))
            .map(|(k, v)| KeyValue::new(k, v));
        Ok(paginate(candidates, page_size))
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> TxTimestamp {
        self.timestamp
    }
}
