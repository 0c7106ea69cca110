//! # Identity Registry (id-02)
//!
//! Issuers, participants (DIDs), roles and access lists stored as JSON records
//! on an ordered key-value ledger, with the secondary indexes and invariants
//! the ledger itself cannot express.
//!
//! ## Architecture
//!
//! ```text
//!   caller ──→ IssuerApi / ParticipantApi / RoleApi / AccessApi / QueryApi
//!                               │
//!                          Invocation  (one ledger transaction)
//!                               │
//!        ┌──────────────┬───────┴──────┬────────────────┐
//!   default_issuer   resolver      tombstones        history
//!   (singleton)     (DID → id)    (soft delete)   (projection)
//!        └──────────────┴───────┬──────┴────────────────┘
//!                               │
//!                   id-01 index maintainer + key codec
//!                               │
//!                          LedgerStore
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | DID Index | Each live participant has exactly one `(did, id)` index entry; none after deletion |
//! | 2 | Default Singleton | At most one `(default, issuerId)` index entry; exactly one once any issuer was created |
//! | 3 | Stable Primary Keys | Primary keys are `(docType, id)` and never encode mutable data |
//! | 4 | Unique Index Keys | Index keys carry the indexed attributes plus the entity ID where needed |
//! | 5 | Tombstones | Participant deletion removes the record and writes an immutable tombstone |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, requests/responses, errors, configuration, DID and name rules
//! - `ports/` - Inbound API traits, outbound certificate/caller/ID ports
//! - `service/` - `IdentityService` and the per-invocation `Invocation`
//! - `adapters/` - Static certificate parser, static caller, ID generators
//!
//! ## Usage
//!
//! ```ignore
//! use id_02_identity_registry::prelude::*;
//! use id_01_ledger_index::InMemoryLedger;
//!
//! let ledger = InMemoryLedger::new();
//! let config = RegistryConfig::default();
//! let admin = StaticCaller::admin("Org1MSP", &config);
//! let service = IdentityService::new(parser, config);
//!
//! let issuer = ledger.submit(|tx| {
//!     service.invoke(tx, &admin).create_issuer(IssuerCreateRequest::new(cert_b64))
//! })?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Fixtures for unit and integration tests.
///
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::{SequentialIdGenerator, StaticCaller, StaticCertificateParser, UuidGenerator};
pub use domain::config::RegistryConfig;
pub use domain::entities::{Access, Issuer, Participant, Role, Tombstone};
pub use domain::errors::IdentityError;
pub use domain::responses::{HistoryRecord, PaginatedQueryResponse, ParticipantResponse};
pub use domain::value_objects::{DocType, FunctionSet, IndexTag, SubjectAttributes};
pub use ports::inbound::{AccessApi, IssuerApi, ParticipantApi, QueryApi, RoleApi};
pub use ports::outbound::{CallerIdentity, CertificateParser, IdGenerator, ParsedCertificate};
pub use service::{transactions, IdentityDependencies, IdentityService, Invocation, TRANSACTIONS};

/// Everything needed to drive the registry.
pub mod prelude {
    pub use crate::domain::requests::*;
    pub use crate::{
        AccessApi, CallerIdentity, CertificateParser, IdentityError, IdentityService, IssuerApi,
        ParticipantApi, QueryApi, RegistryConfig, RoleApi, StaticCaller,
    };
}
