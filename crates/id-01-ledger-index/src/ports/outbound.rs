//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the identity registry requires from its host ledger.

use crate::domain::entities::{HistoryEntry, KeyValue, Page, TxTimestamp};
use crate::domain::errors::LedgerError;

// =============================================================================
// LEDGER
// =============================================================================

/// The ledger as seen from inside one invocation.
///
/// An implementation is a transaction context: writes are buffered and become
/// visible to other transactions only when the surrounding transaction
/// commits. Reads are recorded so the ledger can reject the commit if another
/// transaction changed them first. Nothing here is atomic on its own.
pub trait LedgerStore {
    /// Read a key. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), LedgerError>;

    /// Every key starting with `prefix`, in key order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<KeyValue>, LedgerError>;

    /// One page of keys starting with `prefix`.
    ///
    /// ## Errors
    ///
    /// - `MalformedInput`: `page_size <= 0` or a bookmark this ledger did not issue
    fn scan_prefix_paginated(
        &self,
        prefix: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<Page, LedgerError>;

    /// Committed modifications of `key`, oldest first.
    fn history_of(&self, key: &str) -> Result<Vec<HistoryEntry>, LedgerError>;

    /// Run a backend-specific rich query. The query string is passed through
    /// untouched.
    fn rich_query(&self, query: &str) -> Result<Vec<KeyValue>, LedgerError>;

    /// One page of a rich query.
    fn rich_query_paginated(
        &self,
        query: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<Page, LedgerError>;

    /// ID of the surrounding transaction.
    fn tx_id(&self) -> &str;

    /// Timestamp of the surrounding transaction.
    fn tx_timestamp(&self) -> TxTimestamp;
}

// =============================================================================
// TIME
// =============================================================================

/// Clock used by a ledger to stamp new transactions.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> TxTimestamp;
}
