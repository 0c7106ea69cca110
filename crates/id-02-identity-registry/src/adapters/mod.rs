//! # Adapters Module
//!
//! Implementations of the registry's outbound ports.
//!
//! ## Modules
//!
//! - `certificates`: lookup-table certificate parser for hosts that decode X.509 themselves
//! - `caller`: fixed caller identity
//! - `ids`: UUID and sequential ID generators

pub mod caller;
pub mod certificates;
pub mod ids;

pub use caller::StaticCaller;
pub use certificates::StaticCertificateParser;
pub use ids::{SequentialIdGenerator, UuidGenerator};
