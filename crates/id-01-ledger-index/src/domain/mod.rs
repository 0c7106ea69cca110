//! # Domain Layer
//!
//! Pure types for the ledger index: the composite-key codec, ledger value
//! objects, errors and configuration. Nothing here touches storage.

pub mod composite_key;
pub mod config;
pub mod entities;
pub mod errors;
