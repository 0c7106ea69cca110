//! # Role API Implementation

use super::*;
use crate::domain::entities::Role;
use crate::domain::requests::{FunctionSetUpdateRequest, RoleCreateRequest};
use crate::domain::value_objects::{DocType, FunctionSet};
use crate::ports::inbound::RoleApi;

impl<'a, L, C, P, G> RoleApi for Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    fn create_role(&mut self, request: RoleCreateRequest) -> Result<Role, IdentityError> {
        if request.name.trim().is_empty() {
            return Err(IdentityError::malformed("role name is required"));
        }

        let id = self.next_id();
        let role = Role {
            doc_type: DocType::Role.tag().to_string(),
            id: id.clone(),
            name: request.name,
            description: request.description,
            function_set: request.functions.into_iter().collect(),
        };
        self.write_record(DocType::Role, &id, &role)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(role_id = %id, name = %role.name, functions = role.function_set.len(), "[id-02] role created");

        Ok(role)
    }

    fn get_role(&self, id: &str) -> Result<Role, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(role_id = %id, "[id-02] get role");

        self.load_record(DocType::Role, id)
    }

    fn get_roles(&self) -> Result<Vec<Role>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!("[id-02] get roles");

        self.scan_records(DocType::Role)
    }

    fn update_role(&mut self, request: FunctionSetUpdateRequest) -> Result<Role, IdentityError> {
        self.require_admin()?;
        let mut role: Role = self.load_record(DocType::Role, &request.id)?;
        role.function_set
            .merge(request.functions.into_iter().collect::<FunctionSet>());
        self.write_record(DocType::Role, &request.id, &role)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(role_id = %request.id, functions = role.function_set.len(), "[id-02] role updated");

        Ok(role)
    }

    fn delete_role(&mut self, id: &str) -> Result<(), IdentityError> {
        self.require_admin()?;
        self.remove_record(DocType::Role, id)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(role_id = %id, "[id-02] role deleted");

        Ok(())
    }
}
