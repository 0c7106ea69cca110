//! Value types exchanged with the ledger.

use super::errors::LedgerError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Transaction timestamp as carried by the ledger (seconds + nanos since the
/// Unix epoch). Identical for every endorser of a transaction, so it is the
/// only clock the registry may use for persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxTimestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl TxTimestamp {
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn to_datetime(&self) -> Result<DateTime<Utc>, LedgerError> {
        DateTime::from_timestamp(self.seconds, self.nanos).ok_or_else(|| {
            LedgerError::malformed(format!(
                "timestamp {}s {}ns is out of range",
                self.seconds, self.nanos
            ))
        })
    }

    /// RFC 3339 in UTC at second precision, e.g. `2021-07-30T17:35:27Z`.
    pub fn to_rfc3339(&self) -> Result<String, LedgerError> {
        Ok(self
            .to_datetime()?
            .to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl From<DateTime<Utc>> for TxTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: value.timestamp_subsec_nanos(),
        }
    }
}

/// One `(key, value)` pair from a scan or query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// One committed modification of a key, oldest first in a history stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tx_id: String,
    pub timestamp: TxTimestamp,
    /// Empty when `is_delete` is set.
    pub value: Vec<u8>,
    pub is_delete: bool,
}

/// Pagination metadata returned next to a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub fetched_records_count: i32,
    /// Opaque token for the next page; empty once the range is exhausted.
    pub bookmark: String,
}

impl PageMetadata {
    pub fn is_terminal(&self) -> bool {
        self.bookmark.is_empty()
    }
}

/// A page of raw results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub records: Vec<KeyValue>,
    pub metadata: PageMetadata,
}
