//! Request payloads. Field names match the JSON bodies clients send.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuerCreateRequest {
    /// Defaults to the certificate's common name when empty.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "certPem")]
    pub certificate: String,
    #[serde(rename = "byDefault", default)]
    pub is_default: bool,
}

impl IssuerCreateRequest {
    pub fn new(certificate: impl Into<String>) -> Self {
        Self {
            certificate: certificate.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn as_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuerRenewRequest {
    pub id: String,
    #[serde(rename = "certPem")]
    pub certificate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantCreateRequest {
    pub did: String,
    #[serde(rename = "certPem")]
    pub certificate: String,
    /// Empty selects the default issuer.
    #[serde(rename = "issuerId", default)]
    pub issuer_id: String,
    #[serde(rename = "creatorDid", default)]
    pub creator_did: String,
    #[serde(rename = "roles", default)]
    pub role_ids: Vec<String>,
    #[serde(rename = "attrsExtras", default)]
    pub extra_attributes: BTreeMap<String, String>,
}

impl ParticipantCreateRequest {
    pub fn new(did: impl Into<String>, certificate: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            certificate: certificate.into(),
            ..Default::default()
        }
    }

    pub fn with_issuer(mut self, issuer_id: impl Into<String>) -> Self {
        self.issuer_id = issuer_id.into();
        self
    }

    pub fn with_creator(mut self, creator_did: impl Into<String>) -> Self {
        self.creator_did = creator_did.into();
        self
    }

    pub fn with_roles<I, S>(mut self, role_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.role_ids = role_ids.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantDeleteRequest {
    /// Participant to delete.
    #[serde(rename = "userDid")]
    pub did: String,
    /// Participant on whose behalf the deletion runs; may equal `did`.
    #[serde(rename = "callerDid")]
    pub caller_did: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantRolesUpdateRequest {
    pub did: String,
    #[serde(rename = "roles")]
    pub role_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "contractFunctions", default)]
    pub functions: Vec<String>,
}

/// Adds functions to an existing role or access record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionSetUpdateRequest {
    pub id: String,
    #[serde(rename = "contractFunctions")]
    pub functions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessCreateRequest {
    #[serde(rename = "contractName")]
    pub contract_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "contractFunctions", default)]
    pub functions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionAccessRequest {
    pub did: String,
    /// `Function` or `contract:Function`.
    pub function: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(rename = "pageSize")]
    pub page_size: i32,
    #[serde(default)]
    pub bookmark: String,
}

impl PageRequest {
    pub fn first(page_size: i32) -> Self {
        Self {
            page_size,
            bookmark: String::new(),
        }
    }

    pub fn after(page_size: i32, bookmark: impl Into<String>) -> Self {
        Self {
            page_size,
            bookmark: bookmark.into(),
        }
    }
}
