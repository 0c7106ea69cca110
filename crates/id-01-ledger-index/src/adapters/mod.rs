//! # Adapters Layer
//!
//! - `memory` - In-memory transactional ledger (tests, local tooling)
//! - `time` - Time sources for transaction timestamps

pub mod memory;
pub mod time;
