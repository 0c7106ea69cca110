//! # In-Memory Ledger
//!
//! A single-process ledger with the same observable contract as the
//! production one:
//!
//! - writes are buffered per transaction and applied together on commit
//! - reads see the transaction's own pending writes
//! - every read key and scanned prefix is recorded; commit is rejected with
//!   `ConflictOnCommit` if a transaction committed after this one began
//!   touched any of them
//! - every committed write is appended to the key's history
//! - pagination bookmarks are hex-encoded resume keys
//! - rich queries accept a `{"selector": {...}}` document

mod ledger;
mod query;
mod transaction;


pub use ledger::{CommitReceipt, InMemoryLedger};
pub use transaction::LedgerTransaction;
