//! Bulk record operation wire types

use super::de;
use super::record::{CreateRecordRequest, UpdateRecordRequest};
use serde::{Deserialize, Serialize};

/// One operation of a bulk request
///
/// Serialized with an `action` tag; `update` and `delete` carry the target
/// record `id`, `create` never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BulkOperation {
    Create(CreateRecordRequest),
    Update(BulkUpdate),
    Delete { id: i64 },
}

/// Payload of a bulk `update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub changes: UpdateRecordRequest,
}

impl BulkOperation {
    /// Action tag as sent on the wire
    pub fn action(&self) -> &'static str {
        match self {
            BulkOperation::Create(_) => "create",
            BulkOperation::Update(_) => "update",
            BulkOperation::Delete { .. } => "delete",
        }
    }

    /// Target record id, absent for `create`
    pub fn target(&self) -> Option<i64> {
        match self {
            BulkOperation::Create(_) => None,
            BulkOperation::Update(update) => Some(update.id),
            BulkOperation::Delete { id } => Some(*id),
        }
    }
}

/// `POST zones/{id}/records/bulk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequest {
    pub operations: Vec<BulkOperation>,
}

/// `data` of a bulk response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failure_count: u64,
    #[serde(default, deserialize_with = "de::message_list")]
    pub errors: Vec<String>,
}
