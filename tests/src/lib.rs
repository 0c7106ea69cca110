//! # Identity Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # Registry properties across ledger commits
//!     ├── concurrency.rs  # Racing invocations and commit conflicts
//!     └── flows.rs        # End-to-end flows, logging setup
//!
//! tests/benches/
//! └── registry_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p id-tests
//! cargo test -p id-tests integration::concurrency
//! cargo bench -p id-tests
//! ```

pub mod integration;
