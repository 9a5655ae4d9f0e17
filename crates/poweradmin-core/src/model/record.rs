//! Record wire types

use super::de;
use crate::envelope::Pagination;
use crate::field::Optional;
use serde::{Deserialize, Serialize};

/// Server default TTL in seconds
pub const DEFAULT_TTL: u32 = 3600;

/// A single resource record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(default)]
    pub zone_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub content: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "de::nullable_u32")]
    pub priority: u32,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub disabled: bool,
}

pub(crate) fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// `POST zones/{id}/records`, also the payload of a bulk `create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub content: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub disabled: bool,
    /// Ask the server to create the matching PTR record
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub create_ptr: bool,
}

impl CreateRecordRequest {
    /// A record with default TTL, priority and state
    pub fn new(name: impl Into<String>, rtype: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rtype: rtype.into(),
            content: content.into(),
            ttl: DEFAULT_TTL,
            priority: 0,
            disabled: false,
            create_ptr: false,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }
}

/// `PUT zones/{zone}/records/{id}`; absent keys leave the remote value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(default, skip_serializing_if = "Optional::is_absent")]
    pub name: Optional<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Optional::is_absent")]
    pub rtype: Optional<String>,
    #[serde(default, skip_serializing_if = "Optional::is_absent")]
    pub content: Optional<String>,
    #[serde(default, skip_serializing_if = "Optional::is_absent")]
    pub ttl: Optional<u32>,
    #[serde(default, skip_serializing_if = "Optional::is_absent")]
    pub priority: Optional<u32>,
    #[serde(default, skip_serializing_if = "Optional::is_absent")]
    pub disabled: Optional<bool>,
}

impl UpdateRecordRequest {
    /// True when no key would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.rtype.is_absent()
            && self.content.is_absent()
            && self.ttl.is_absent()
            && self.priority.is_absent()
            && self.disabled.is_absent()
    }
}

/// `data` of `GET`/`POST`/`PUT` on a single record
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEnvelope {
    #[serde(default)]
    pub record: Option<Record>,
}

/// `data` of `GET zones/{id}/records`
///
/// Some server versions return the bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordList {
    Paged {
        #[serde(default)]
        records: Vec<Record>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
    Bare(Vec<Record>),
}

impl RecordList {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            RecordList::Paged { records, .. } => records,
            RecordList::Bare(records) => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_omits_unset_ptr_flag() {
        let req = CreateRecordRequest::new("www", "A", "192.0.2.10").with_ttl(300);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"name": "www", "type": "A", "content": "192.0.2.10", "ttl": 300, "priority": 0, "disabled": false})
        );

        let req = CreateRecordRequest {
            create_ptr: true,
            ..req
        };
        assert_eq!(serde_json::to_value(&req).unwrap()["create_ptr"], json!(true));
    }

    #[test]
    fn record_defaults_missing_fields() {
        let record: Record = serde_json::from_value(json!({
            "id": 10, "zone_id": 1, "name": "www.example.com", "type": "A",
            "content": "192.0.2.10", "priority": null, "disabled": "0"
        }))
        .unwrap();
        assert_eq!(record.ttl, DEFAULT_TTL);
        assert_eq!(record.priority, 0);
        assert!(!record.disabled);
    }

    #[test]
    fn list_accepts_both_shapes() {
        let paged: RecordList = serde_json::from_value(json!({
            "records": [{"id": 1, "name": "a", "type": "A", "content": "x"}],
            "pagination": {"current_page": 1, "per_page": 50, "total_pages": 1, "total_items": 1}
        }))
        .unwrap();
        assert_eq!(paged.into_records().len(), 1);

        let bare: RecordList =
            serde_json::from_value(json!([{"id": 1, "name": "a", "type": "A", "content": "x"}])).unwrap();
        assert_eq!(bare.into_records().len(), 1);
    }
}
