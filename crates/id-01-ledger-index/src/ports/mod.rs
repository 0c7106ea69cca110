//! # Ports Layer
//!
//! The ledger is consumed, never implemented, by the layers above: this crate
//! only exposes outbound (driven) ports.

pub mod outbound;

pub use outbound::*;
