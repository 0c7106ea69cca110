//! # Identity Registry Service
//!
//! `IdentityService` holds the long-lived collaborators (certificate parser,
//! ID generator, configuration). Each call against the ledger goes through an
//! [`Invocation`], which binds the service to one ledger transaction and one
//! caller:
//!
//! ```ignore
//! ledger.submit(|tx| service.invoke(tx, &caller).create_role(request))?;
//! ```
//!
//! ## Architecture
//!
//! The API traits are implemented per aggregate (`issuers`, `participants`,
//! `roles`, `access`, `queries`). Shared steps live in:
//! 1. `records`: typed JSON reads, writes, scans and pages
//! 2. `default_issuer`: the default-issuer index swap
//! 3. `resolver`: DID to internal ID, tombstones
//! 4. `history`: ledger history projected onto records
//! 5. `certificates`: certificate uniqueness and validity

mod access;
mod certificates;
mod default_issuer;
mod history;
mod issuers;
mod participants;
mod queries;
mod records;
mod resolver;
mod roles;

use crate::adapters::UuidGenerator;
use crate::domain::config::RegistryConfig;
use crate::domain::errors::IdentityError;
use crate::ports::outbound::{CallerIdentity, CertificateParser, IdGenerator};
use id_01_ledger_index::LedgerStore;

/// Operation names the registry exposes to callers. `init_ledger` seeds the
/// registry's own Access record with them.
pub const TRANSACTIONS: &[&str] = &[
    "InitLedger",
    "CreateIssuer",
    "RenewIssuer",
    "GetIssuer",
    "GetIssuers",
    "GetDefaultIssuer",
    "DeleteIssuer",
    "GetIssuerHistory",
    "CreateParticipant",
    "GetParticipant",
    "GetParticipantRecord",
    "GetParticipants",
    "GetParticipantsPage",
    "ParticipantExists",
    "DisarmParticipant",
    "UpdateParticipantRoles",
    "DeleteParticipant",
    "GetParticipantHistory",
    "GetTombstones",
    "CheckFunctionAccess",
    "CreateRole",
    "GetRole",
    "GetRoles",
    "UpdateRole",
    "DeleteRole",
    "CreateAccess",
    "GetAccess",
    "GetAccesses",
    "UpdateAccess",
    "DeleteAccess",
    "QueryAssets",
    "QueryAssetsPage",
];

/// The static list of invocable operation names.
pub fn transactions() -> &'static [&'static str] {
    TRANSACTIONS
}

/// The identity registry.
pub struct IdentityService<P, G = UuidGenerator>
where
    P: CertificateParser,
    G: IdGenerator,
{
    /// Certificate decoding.
    pub(crate) certificates: P,
    /// Internal IDs for issuers, participants and roles.
    pub(crate) ids: G,
    pub(crate) config: RegistryConfig,
}

/// Dependencies for IdentityService
pub struct IdentityDependencies<P, G> {
    pub certificates: P,
    pub ids: G,
}

impl<P> IdentityService<P, UuidGenerator>
where
    P: CertificateParser,
{
    /// Service generating UUIDv4 IDs.
    pub fn new(certificates: P, config: RegistryConfig) -> Self {
        Self::with_dependencies(
            IdentityDependencies {
                certificates,
                ids: UuidGenerator,
            },
            config,
        )
    }
}

impl<P, G> IdentityService<P, G>
where
    P: CertificateParser,
    G: IdGenerator,
{
    pub fn with_dependencies(deps: IdentityDependencies<P, G>, config: RegistryConfig) -> Self {
        Self {
            certificates: deps.certificates,
            ids: deps.ids,
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Bind the service to one ledger transaction and the caller that
    /// submitted it.
    pub fn invoke<'a, L, C>(&'a self, ledger: &'a mut L, caller: &'a C) -> Invocation<'a, L, C, P, G>
    where
        L: LedgerStore + ?Sized,
        C: CallerIdentity + ?Sized,
    {
        Invocation {
            service: self,
            ledger,
            caller,
        }
    }
}

/// One invocation: a service, a ledger transaction and a caller.
///
/// Operations run to completion against `ledger` with no local rollback. An
/// error leaves buffered writes behind, so the transaction must be discarded.
pub struct Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    pub(crate) service: &'a IdentityService<P, G>,
    pub(crate) ledger: &'a mut L,
    pub(crate) caller: &'a C,
}

impl<'a, L, C, P, G> Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    /// Fail with `Unauthorized` unless the caller belongs to the admin unit.
    pub(crate) fn require_admin(&self) -> Result<(), IdentityError> {
        let unit = &self.service.config.admin_org_unit;
        if self.caller.is_in_org_unit(unit)? {
            Ok(())
        } else {
            Err(IdentityError::unauthorized(format!(
                "caller is not in organizational unit {unit:?}"
            )))
        }
    }

    /// Transaction timestamp, RFC 3339.
    pub(crate) fn tx_time(&self) -> Result<String, IdentityError> {
        Ok(self.ledger.tx_timestamp().to_rfc3339()?)
    }

    pub(crate) fn next_id(&self) -> String {
        self.service.ids.generate()
    }
}
