//! # Domain Layer
//!
//! Records, requests, responses and the rules that need no ledger access:
//! DID syntax, access-name normalization, function-name matching.

pub mod config;
pub mod did;
pub mod entities;
pub mod errors;
pub mod normalize;
pub mod requests;
pub mod responses;
pub mod value_objects;
