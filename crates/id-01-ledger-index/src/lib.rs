//! # Ledger Index (id-01)
//!
//! Composite keys, secondary indexes and the ledger port that the identity
//! registry is built on.
//!
//! The backing ledger offers nothing but flat key/value storage with ordered
//! prefix scans, a per-key history and transaction-level atomicity. This crate
//! adds the two primitives everything above it relies on:
//!
//! - **Key Codec** (`domain::composite_key`): `(tag, [attr...])` <-> storage key
//! - **Index Maintainer** (`index`): sentinel-valued marker keys that make an
//!   attribute tuple discoverable by prefix scan
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Lossless Keys | `split(create(tag, attrs)) == (tag, attrs)` |
//! | 2 | Prefix Property | `create(tag, [a])` is a prefix of `create(tag, [a, b])` |
//! | 3 | Marker Values | Index entries hold a single `0x00` byte, never entity data |
//! | 4 | Atomic Commit | A transaction's writes become visible together or not at all |
//! | 5 | Optimistic Reads | Commit is rejected if anything read changed underneath |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key codec, ledger value types, errors, configuration
//! - `ports/` - `LedgerStore` (transaction context) and `TimeSource`
//! - `index/` - Index create/delete/scan over any `LedgerStore`
//! - `adapters/` - In-memory transactional ledger, time sources
//!
//! ## Usage
//!
//! ```ignore
//! use id_01_ledger_index::{index, InMemoryLedger, LedgerStore};
//!
//! let ledger = InMemoryLedger::new();
//! ledger.submit(|tx| {
//!     index::create_index(tx, "did.participant:did~uuid", &["did:abc", "42"])?;
//!     Ok::<_, id_01_ledger_index::LedgerError>(())
//! })?;
//! ```

pub mod adapters;
pub mod domain;
pub mod index;
pub mod ports;

// Re-export key types for convenience
pub use adapters::memory::{CommitReceipt, InMemoryLedger, LedgerTransaction};
pub use adapters::time::{SteppingTimeSource, SystemTimeSource};
pub use domain::composite_key::{
    create_composite_key, split_composite_key, split_composite_key_expecting, CompositeKey,
};
pub use domain::config::LedgerConfig;
pub use domain::entities::{HistoryEntry, KeyValue, Page, PageMetadata, TxTimestamp};
pub use domain::errors::LedgerError;
pub use index::{create_index, delete_index, scan_index, scan_partial_composite_key, INDEX_VALUE};
pub use ports::outbound::{LedgerStore, TimeSource};
