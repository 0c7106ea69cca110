//! # Access API Implementation
//!
//! Access records are keyed by the normalized contract name instead of a
//! generated ID.

use super::*;
use crate::domain::entities::Access;
use crate::domain::normalize::normalize_access_name;
use crate::domain::requests::{AccessCreateRequest, FunctionSetUpdateRequest, PageRequest};
use crate::domain::responses::PaginatedQueryResponse;
use crate::domain::value_objects::{DocType, FunctionSet};
use crate::ports::inbound::AccessApi;

fn access_id(name: &str) -> Result<String, IdentityError> {
    let id = normalize_access_name(name);
    if id.is_empty() {
        return Err(IdentityError::malformed(format!(
            "contract name {name:?} is empty after normalization"
        )));
    }
    Ok(id)
}

impl<'a, L, C, P, G> AccessApi for Invocation<'a, L, C, P, G>
where
    L: LedgerStore + ?Sized,
    C: CallerIdentity + ?Sized,
    P: CertificateParser,
    G: IdGenerator,
{
    fn create_access(&mut self, request: AccessCreateRequest) -> Result<Access, IdentityError> {
        let id = access_id(&request.contract_name)?;
        if self.record_exists(DocType::Access, &id)? {
            return Err(IdentityError::already_exists(DocType::Access.entity(), id));
        }

        let access = Access {
            doc_type: DocType::Access.tag().to_string(),
            id: id.clone(),
            description: request.description,
            function_set: request.functions.into_iter().collect(),
        };
        self.write_record(DocType::Access, &id, &access)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(access_id = %id, functions = access.function_set.len(), "[id-02] access created");

        Ok(access)
    }

    fn get_access(&self, id: &str) -> Result<Access, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(access_id = %id, "[id-02] get access");

        self.load_record(DocType::Access, &access_id(id)?)
    }

    fn get_accesses(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedQueryResponse<Access>, IdentityError> {
        #[cfg(feature = "tracing-log")]
        tracing::debug!(page_size = page.page_size, "[id-02] get accesses");

        self.page_records(DocType::Access, &page)
    }

    fn update_access(&mut self, request: FunctionSetUpdateRequest) -> Result<Access, IdentityError> {
        self.require_admin()?;
        let id = access_id(&request.id)?;
        let mut access: Access = self.load_record(DocType::Access, &id)?;
        access
            .function_set
            .merge(request.functions.into_iter().collect::<FunctionSet>());
        self.write_record(DocType::Access, &id, &access)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(access_id = %id, functions = access.function_set.len(), "[id-02] access updated");

        Ok(access)
    }

    fn delete_access(&mut self, id: &str) -> Result<(), IdentityError> {
        self.require_admin()?;
        let id = access_id(id)?;
        self.remove_record(DocType::Access, &id)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(access_id = %id, "[id-02] access deleted");

        Ok(())
    }

    /// Rerunning after an upgrade adds newly introduced operation names to
    /// the existing record.
    fn init_ledger(&mut self) -> Result<Access, IdentityError> {
        self.require_admin()?;
        let id = access_id(&self.service.config.contract_name)?;
        let functions: FunctionSet = transactions().iter().copied().collect();

        let access = match self.read_record::<Access>(DocType::Access, &id)? {
            Some(mut existing) => {
                existing.function_set.merge(functions);
                existing
            }
            None => Access {
                doc_type: DocType::Access.tag().to_string(),
                id: id.clone(),
                description: format!("Operations of {}", self.service.config.contract_name),
                function_set: functions,
            },
        };
        self.write_record(DocType::Access, &id, &access)?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(access_id = %id, functions = access.function_set.len(), "[id-02] ledger initialized");

        Ok(access)
    }
}
