//! Response shapes: public projections, history records and pages.

use super::entities::Participant;
use serde::{Deserialize, Serialize};

/// What any caller may learn about a participant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub did: String,
    #[serde(rename = "roles")]
    pub role_ids: Vec<String>,
    /// Internal ID of the creating participant; empty when there is none.
    #[serde(rename = "creator", default, skip_serializing_if = "String::is_empty")]
    pub creator_id: String,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            did: participant.did.clone(),
            role_ids: participant.role_ids.clone(),
            creator_id: participant.creator_id.clone(),
        }
    }
}

/// One entry of a record's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord<T> {
    pub tx_id: String,
    /// Commit time, RFC 3339.
    pub timestamp: String,
    /// Snapshot after the transaction. For a delete only the identifying
    /// fields are filled in.
    pub record: T,
    pub is_delete: bool,
}

/// One page of decoded records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedQueryResponse<T> {
    pub records: Vec<T>,
    pub fetched_records_count: i32,
    /// Pass back to fetch the next page; empty on the last page.
    pub bookmark: String,
}

impl<T> PaginatedQueryResponse<T> {
    pub fn is_last_page(&self) -> bool {
        self.bookmark.is_empty()
    }
}
