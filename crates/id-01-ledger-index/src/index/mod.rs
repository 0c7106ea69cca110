//! # Index Maintainer
//!
//! Secondary indexes are ordinary ledger entries whose key is a composite key
//! and whose value is a single `0x00` byte. They carry no entity data; they
//! exist so an attribute tuple can be found with a prefix scan.
//!
//! These helpers are deliberately thin. A sequence of index and record writes
//! is only all-or-nothing because the surrounding ledger transaction is.

mod maintainer;

pub use maintainer::{
    create_index, delete_index, scan_index, scan_partial_composite_key, INDEX_VALUE,
};
