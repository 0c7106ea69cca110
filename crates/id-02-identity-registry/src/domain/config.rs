//! Registry configuration.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Organizational unit a caller must belong to for admin operations.
    pub admin_org_unit: String,
    /// Name under which `init_ledger` registers the registry's own Access
    /// record.
    pub contract_name: String,
    /// Every DID must start with this.
    pub did_method_prefix: String,
    /// Reject participant certificates whose validity window does not contain
    /// the transaction timestamp.
    pub enforce_certificate_validity: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            admin_org_unit: "admin".to_string(),
            contract_name: "org.identity".to_string(),
            did_method_prefix: "did:".to_string(),
            enforce_certificate_validity: true,
        }
    }
}

impl RegistryConfig {
    /// Read overrides from the environment.
    ///
    /// - `ID_ADMIN_ORG_UNIT` (default: admin)
    /// - `ID_CONTRACT_NAME` (default: org.identity)
    /// - `ID_DID_PREFIX` (default: did:)
    /// - `ID_ENFORCE_CERT_VALIDITY` (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            admin_org_unit: env::var("ID_ADMIN_ORG_UNIT").unwrap_or(defaults.admin_org_unit),
            contract_name: env::var("ID_CONTRACT_NAME").unwrap_or(defaults.contract_name),
            did_method_prefix: env::var("ID_DID_PREFIX").unwrap_or(defaults.did_method_prefix),
            enforce_certificate_validity: env::var("ID_ENFORCE_CERT_VALIDITY")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enforce_certificate_validity),
        }
    }

    pub fn with_admin_org_unit(mut self, org_unit: impl Into<String>) -> Self {
        self.admin_org_unit = org_unit.into();
        self
    }

    pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = name.into();
        self
    }

    pub fn with_did_method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.did_method_prefix = prefix.into();
        self
    }

    pub fn with_certificate_validity(mut self, enforce: bool) -> Self {
        self.enforce_certificate_validity = enforce;
        self
    }
}
