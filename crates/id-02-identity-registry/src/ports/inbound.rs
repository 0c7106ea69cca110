//! # Inbound Ports (Driving Ports)
//!
//! The operations the registry exposes. Every method runs inside the ledger
//! transaction of the `Invocation` it is called on; on `Err` that
//! transaction must be discarded.

use crate::domain::entities::{Access, Issuer, Participant, Role, Tombstone};
use crate::domain::errors::IdentityError;
use crate::domain::requests::{
    AccessCreateRequest, FunctionAccessRequest, FunctionSetUpdateRequest, IssuerCreateRequest,
    IssuerRenewRequest, PageRequest, ParticipantCreateRequest, ParticipantDeleteRequest,
    ParticipantRolesUpdateRequest, RoleCreateRequest,
};
use crate::domain::responses::{HistoryRecord, PaginatedQueryResponse, ParticipantResponse};
use serde_json::Value;

/// Issuer lifecycle and the default-issuer singleton.
pub trait IssuerApi {
    /// Register an issuer certificate.
    ///
    /// The first issuer ever created becomes the default regardless of
    /// `is_default`. Later issuers requesting default status take it over
    /// from the current default.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller is not admin
    /// - `AlreadyExists`: another issuer uses the same certificate
    /// - `CertificateInvalid`: certificate cannot be parsed
    fn create_issuer(&mut self, request: IssuerCreateRequest) -> Result<Issuer, IdentityError>;

    /// Replace an issuer's certificate and everything derived from it. The
    /// default flag is left alone.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`, `NotFound`, `CertificateInvalid`
    fn renew_issuer(&mut self, request: IssuerRenewRequest) -> Result<Issuer, IdentityError>;

    fn get_issuer(&self, id: &str) -> Result<Issuer, IdentityError>;

    fn get_issuers(&self) -> Result<Vec<Issuer>, IdentityError>;

    /// ## Errors
    ///
    /// - `NoDefaultIssuer`: no issuer holds the default flag
    fn get_default_issuer(&self) -> Result<Issuer, IdentityError>;

    /// Remove an issuer and, if present, its default flag.
    fn delete_issuer(&mut self, id: &str) -> Result<(), IdentityError>;

    fn get_issuer_history(&self, id: &str) -> Result<Vec<HistoryRecord<Issuer>>, IdentityError>;
}

/// Participant lifecycle and DID resolution.
pub trait ParticipantApi {
    /// Register a participant under a new internal ID.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller is not admin
    /// - `InvalidDid`: DID is malformed
    /// - `AlreadyExists`: DID already resolves, or the certificate is in use
    /// - `CertificateInvalid`: certificate unparseable or outside its validity window
    /// - `NotFound`: creator DID, issuer or a role does not exist
    /// - `NoDefaultIssuer`: no issuer given and none is default
    fn create_participant(
        &mut self,
        request: ParticipantCreateRequest,
    ) -> Result<Participant, IdentityError>;

    /// Internal ID the DID currently maps to.
    fn resolve_did(&self, did: &str) -> Result<String, IdentityError>;

    /// Public projection of a participant.
    fn get_participant(&self, did: &str) -> Result<ParticipantResponse, IdentityError>;

    /// Full record. Admin only.
    fn get_participant_record(&self, did: &str) -> Result<Participant, IdentityError>;

    fn get_participants(&self) -> Result<Vec<ParticipantResponse>, IdentityError>;

    fn get_participants_page(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<ParticipantResponse>, IdentityError>;

    fn participant_exists(&self, did: &str) -> Result<bool, IdentityError>;

    /// Mark a participant inactive without deleting it.
    fn disarm_participant(&mut self, did: &str) -> Result<Participant, IdentityError>;

    /// Replace a participant's role set.
    fn update_participant_roles(
        &mut self,
        request: ParticipantRolesUpdateRequest,
    ) -> Result<Participant, IdentityError>;

    /// Delete a participant and leave a tombstone.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller not admin, or from another organization than the owner
    /// - `NotFound`: participant or caller DID does not resolve
    fn delete_participant(
        &mut self,
        request: ParticipantDeleteRequest,
    ) -> Result<Tombstone, IdentityError>;

    /// History of the participant's primary record. Still available after
    /// deletion.
    fn get_participant_history(
        &self,
        did: &str,
    ) -> Result<Vec<HistoryRecord<Participant>>, IdentityError>;

    /// Every tombstone written for `did`, oldest internal ID first.
    fn get_tombstones(&self, did: &str) -> Result<Vec<Tombstone>, IdentityError>;

    /// Whether the participant behind `did` may call `function`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: DID does not resolve
    /// - `Unauthorized`: participant disarmed, or none of its roles lists the function
    fn check_function_access(&self, request: FunctionAccessRequest) -> Result<(), IdentityError>;
}

/// Role allow-lists.
pub trait RoleApi {
    fn create_role(&mut self, request: RoleCreateRequest) -> Result<Role, IdentityError>;

    fn get_role(&self, id: &str) -> Result<Role, IdentityError>;

    fn get_roles(&self) -> Result<Vec<Role>, IdentityError>;

    /// Add functions to a role.
    fn update_role(&mut self, request: FunctionSetUpdateRequest) -> Result<Role, IdentityError>;

    /// ## Errors
    ///
    /// - `NotFound`: no such role
    fn delete_role(&mut self, id: &str) -> Result<(), IdentityError>;
}

/// Per-contract allow-lists, keyed by normalized contract name.
pub trait AccessApi {
    fn create_access(&mut self, request: AccessCreateRequest) -> Result<Access, IdentityError>;

    /// `id` is normalized before lookup.
    fn get_access(&self, id: &str) -> Result<Access, IdentityError>;

    fn get_accesses(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<Access>, IdentityError>;

    /// Add functions to an access record.
    fn update_access(&mut self, request: FunctionSetUpdateRequest) -> Result<Access, IdentityError>;

    fn delete_access(&mut self, id: &str) -> Result<(), IdentityError>;

    /// Register the registry's own Access record. Admin only.
    fn init_ledger(&mut self) -> Result<Access, IdentityError>;
}

/// Rich queries, passed through to the ledger untouched.
pub trait QueryApi {
    fn query_assets(&self, query: Value) -> Result<Vec<Value>, IdentityError>;

    fn query_assets_page(
        &self,
        query: Value,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<Value>, IdentityError>;
}
