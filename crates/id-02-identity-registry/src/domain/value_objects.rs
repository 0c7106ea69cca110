//! # Value Objects
//!
//! Key tags, function allow-lists and certificate subject attributes.
//!
//! The tag strings below are part of the persisted format. Changing one
//! orphans every record or index entry written under the old tag.

use crate::domain::errors::IdentityError;
use id_01_ledger_index::create_composite_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// KEY TAGS
// =============================================================================

/// Entity kinds. Each one is stored under the primary key `(tag, [id])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    Issuer,
    Participant,
    Role,
    Access,
}

impl DocType {
    pub const fn tag(&self) -> &'static str {
        match self {
            DocType::Issuer => "did.issuer",
            DocType::Participant => "did.participant",
            DocType::Role => "did.role",
            DocType::Access => "did.access",
        }
    }

    /// Human-readable name used in error messages.
    pub const fn entity(&self) -> &'static str {
        match self {
            DocType::Issuer => "issuer",
            DocType::Participant => "participant",
            DocType::Role => "role",
            DocType::Access => "access",
        }
    }

    /// Primary key of the record with this `id`.
    pub fn primary_key(&self, id: &str) -> Result<String, IdentityError> {
        Ok(create_composite_key(self.tag(), &[id])?)
    }

    /// Scan prefix covering every record of this kind.
    pub fn all_records_prefix(&self) -> Result<String, IdentityError> {
        Ok(create_composite_key::<&str>(self.tag(), &[])?)
    }
}

/// Secondary index and auxiliary namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexTag {
    /// `(did, participantId)`: the DID resolver's index.
    ParticipantByDid,
    /// `(issuerId)`: the current default issuer.
    IssuerByDefault,
    /// `(did, participantId)`: tombstones of deleted participants.
    ParticipantDeleted,
}

impl IndexTag {
    pub const fn tag(&self) -> &'static str {
        match self {
            IndexTag::ParticipantByDid => "did.participant:did~uuid",
            IndexTag::IssuerByDefault => "did.issuer:default~uuid",
            IndexTag::ParticipantDeleted => "did.participant~deleted~did",
        }
    }

    /// Number of attributes every key under this tag carries.
    pub const fn arity(&self) -> usize {
        match self {
            IndexTag::ParticipantByDid => 2,
            IndexTag::IssuerByDefault => 1,
            IndexTag::ParticipantDeleted => 2,
        }
    }
}

// =============================================================================
// FUNCTION SETS
// =============================================================================

/// Set of callable operation names.
///
/// Persisted as a JSON object whose keys are the names and whose values are
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FunctionSet(BTreeSet<String>);

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, function: impl Into<String>) -> bool {
        self.0.insert(function.into())
    }

    pub fn contains(&self, function: &str) -> bool {
        self.0.contains(function)
    }

    /// Add every name of `other`.
    pub fn merge(&mut self, other: FunctionSet) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if some entry names the same function as `requested`. Both
    /// sides may be qualified as `contract:Function`; only the function part
    /// is compared.
    pub fn allows(&self, requested: &str) -> Result<bool, IdentityError> {
        let wanted = function_name(requested)?;
        Ok(self
            .0
            .iter()
            .any(|entry| function_name(entry).is_ok_and(|name| name == wanted)))
    }
}

impl From<BTreeMap<String, String>> for FunctionSet {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value.into_keys().collect())
    }
}

impl From<FunctionSet> for BTreeMap<String, String> {
    fn from(value: FunctionSet) -> Self {
        value.0.into_iter().map(|f| (f, String::new())).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FunctionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// `"Function"` or the function part of `"contract:Function"`.
pub fn function_name(qualified: &str) -> Result<&str, IdentityError> {
    let mut parts = qualified.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) if !name.is_empty() => Ok(name),
        (Some(_), Some(name), None) if !name.is_empty() => Ok(name),
        _ => Err(IdentityError::malformed(format!(
            "invalid function name {qualified:?}"
        ))),
    }
}

// =============================================================================
// SUBJECT ATTRIBUTES
// =============================================================================

/// Subject fields extracted from a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAttributes {
    pub name: String,
    pub dni: String,
    pub company: String,
    pub position: String,
    pub country: String,
    pub province: String,
    pub locality: String,
    pub organizational_unit: String,
}
