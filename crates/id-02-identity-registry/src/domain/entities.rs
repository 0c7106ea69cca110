//! # Entities
//!
//! Records as they are stored on the ledger. Serde field names follow the
//! persisted JSON layout, which existing ledgers already contain; the Rust
//! field names describe what the value means.

use super::value_objects::{DocType, FunctionSet, SubjectAttributes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A certificate authority whose certificate participants may be issued
/// under.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Issuer {
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub id: String,
    pub name: String,
    /// Base64-encoded PEM.
    #[serde(rename = "certPem")]
    pub certificate: String,
    #[serde(rename = "attrs", default)]
    pub subject_attributes: SubjectAttributes,
    #[serde(rename = "attrsExtras", default)]
    pub extra_attributes: BTreeMap<String, String>,
    /// Certificate `notBefore`, RFC 3339.
    #[serde(rename = "issuedTime")]
    pub issued_at: String,
    /// Certificate `notAfter`, RFC 3339.
    #[serde(rename = "expiresTime")]
    pub expires_at: String,
    pub active: bool,
    #[serde(rename = "byDefault")]
    pub is_default: bool,
}

impl Issuer {
    /// History placeholder for a snapshot with no value.
    pub fn placeholder(id: &str) -> Self {
        Self {
            doc_type: DocType::Issuer.tag().to_string(),
            id: id.to_string(),
            ..Default::default()
        }
    }
}

/// An identity holder, addressed externally by DID and internally by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub id: String,
    pub did: String,
    #[serde(rename = "certPem", default)]
    pub certificate: String,
    #[serde(rename = "issuerId")]
    pub issuer_id: String,
    /// Internal ID of the participant that created this one. May dangle once
    /// the creator is deleted.
    #[serde(rename = "creator", default, skip_serializing_if = "String::is_empty")]
    pub creator_id: String,
    #[serde(rename = "roles", default)]
    pub role_ids: Vec<String>,
    #[serde(rename = "attrs", default)]
    pub subject_attributes: SubjectAttributes,
    #[serde(rename = "attrsExtras", default)]
    pub extra_attributes: BTreeMap<String, String>,
    /// Transaction timestamp of creation, RFC 3339.
    #[serde(rename = "time")]
    pub created_at: String,
    #[serde(rename = "issuedTime")]
    pub issued_at: String,
    #[serde(rename = "expiresTime")]
    pub expires_at: String,
    pub active: bool,
    /// Organization (MSP) of the admin that created the participant.
    #[serde(rename = "mspID")]
    pub owner_org_id: String,
}

impl Participant {
    pub fn placeholder(id: &str, did: &str) -> Self {
        Self {
            doc_type: DocType::Participant.tag().to_string(),
            id: id.to_string(),
            did: did.to_string(),
            ..Default::default()
        }
    }
}

/// A named allow-list of operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "contractFunctions", default)]
    pub function_set: FunctionSet,
}

/// Per-contract allow-list, keyed by the normalized contract name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Access {
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "contractFunctions", default)]
    pub function_set: FunctionSet,
}

/// Written once when a participant is deleted; never updated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tombstone {
    #[serde(rename = "mspId")]
    pub owner_org_id: String,
    #[serde(rename = "time")]
    pub deleted_at: String,
    /// Internal ID of the participant on whose behalf the deletion ran.
    #[serde(rename = "callerId")]
    pub deleting_caller_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_participant_wire_format() {
        let participant = Participant {
            doc_type: "did.participant".into(),
            id: "p1".into(),
            did: "did:abc".into(),
            issuer_id: "i1".into(),
            role_ids: vec!["r1".into()],
            owner_org_id: "Org1MSP".into(),
            active: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&participant).unwrap();
        assert_eq!(value["docType"], "did.participant");
        assert_eq!(value["issuerId"], "i1");
        assert_eq!(value["roles"], json!(["r1"]));
        assert_eq!(value["mspID"], "Org1MSP");
        assert!(value.get("creator").is_none());
        assert_eq!(value["certPem"], "");
    }

    #[test]
    fn test_issuer_reads_legacy_record() {
        let legacy = json!({
            "docType": "did.issuer",
            "id": "i1",
            "name": "Root CA",
            "certPem": "Y2VydA==",
            "attrs": {"name": "Root CA", "dni": "", "company": "Acme", "position": "",
                      "country": "CU", "province": "", "locality": "", "organizationalUnit": ""},
            "attrsExtras": {},
            "issuedTime": "2021-07-30T17:35:27Z",
            "expiresTime": "2023-07-30T17:35:26Z",
            "active": false,
            "byDefault": true
        });
        let issuer: Issuer = serde_json::from_value(legacy).unwrap();
        assert!(issuer.is_default);
        assert_eq!(issuer.subject_attributes.company, "Acme");
        assert_eq!(issuer.certificate, "Y2VydA==");
    }

    #[test]
    fn test_role_omits_empty_description() {
        let role = Role {
            doc_type: "did.role".into(),
            id: "r1".into(),
            name: "reader".into(),
            description: String::new(),
            function_set: ["GetParticipant"].into_iter().collect(),
        };
        let value = serde_json::to_value(&role).unwrap();
        assert!(value.get("description").is_none());
        assert_eq!(value["contractFunctions"], json!({"GetParticipant": ""}));
    }

    #[test]
    fn test_tombstone_wire_format() {
        let tombstone = Tombstone {
            owner_org_id: "Org1MSP".into(),
            deleted_at: "2024-01-01T00:00:00Z".into(),
            deleting_caller_id: "p9".into(),
        };
        assert_eq!(
            serde_json::to_value(&tombstone).unwrap(),
            json!({"mspId": "Org1MSP", "time": "2024-01-01T00:00:00Z", "callerId": "p9"})
        );
    }

    #[test]
    fn test_placeholders_carry_identity() {
        let p = Participant::placeholder("p1", "did:abc");
        assert_eq!((p.id.as_str(), p.did.as_str()), ("p1", "did:abc"));
        assert_eq!(Issuer::placeholder("i1").doc_type, "did.issuer");
    }
}
