//! # Ports Layer
//!
//! - `inbound` - APIs the registry offers, one trait per aggregate
//! - `outbound` - Certificate parsing, caller identity and ID generation

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
