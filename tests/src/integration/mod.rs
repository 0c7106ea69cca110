//! # Integration Tests
//!
//! Registry and ledger crates driven together through committed
//! transactions.

pub mod concurrency;
pub mod flows;
pub mod scenarios;
