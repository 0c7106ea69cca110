//! Fixed caller identity.

use crate::domain::config::RegistryConfig;
use crate::domain::errors::IdentityError;
use crate::ports::outbound::CallerIdentity;
use std::collections::BTreeSet;

/// A caller whose organization and organizational units are known up front,
/// e.g. taken from an already verified client certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCaller {
    org_id: String,
    org_units: BTreeSet<String>,
}

impl StaticCaller {
    pub fn new<I, S>(org_id: impl Into<String>, org_units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            org_id: org_id.into(),
            org_units: org_units.into_iter().map(Into::into).collect(),
        }
    }

    /// Member of `org_id` carrying the admin unit `config` checks for.
    pub fn admin(org_id: impl Into<String>, config: &RegistryConfig) -> Self {
        Self::new(org_id, [config.admin_org_unit.as_str()])
    }

    /// Member of `org_id` without any organizational unit.
    pub fn member(org_id: impl Into<String>) -> Self {
        Self::new(org_id, std::iter::empty::<String>())
    }

    pub fn with_org_unit(mut self, org_unit: impl Into<String>) -> Self {
        self.org_units.insert(org_unit.into());
        self
    }
}

impl CallerIdentity for StaticCaller {
    fn is_in_org_unit(&self, org_unit: &str) -> Result<bool, IdentityError> {
        Ok(self.org_units.contains(org_unit))
    }

    fn org_id(&self) -> Result<String, IdentityError> {
        if self.org_id.is_empty() {
            return Err(IdentityError::unauthorized("caller has no organization"));
        }
        Ok(self.org_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_carries_admin_unit() {
        let caller = StaticCaller::admin("Org1MSP", &RegistryConfig::default());
        assert!(caller.is_in_org_unit("admin").unwrap());
        assert!(!caller.is_in_org_unit("client").unwrap());
        assert_eq!(caller.org_id().unwrap(), "Org1MSP");
    }

    #[test]
    fn test_admin_follows_configured_unit() {
        let config = RegistryConfig::default().with_admin_org_unit("registrars");
        let caller = StaticCaller::admin("Org1MSP", &config);
        assert!(caller.is_in_org_unit("registrars").unwrap());
        assert!(!caller.is_in_org_unit("admin").unwrap());
    }

    #[test]
    fn test_member_has_no_units() {
        let caller = StaticCaller::member("Org2MSP").with_org_unit("client");
        assert!(!caller.is_in_org_unit("admin").unwrap());
        assert!(caller.is_in_org_unit("client").unwrap());
    }

    #[test]
    fn test_missing_org_is_unauthorized() {
        let caller = StaticCaller::member("");
        assert!(matches!(caller.org_id(), Err(IdentityError::Unauthorized { .. })));
    }
}
