//! Wire models
//!
//! Request and response shapes of the Poweradmin v2 API, one module per
//! entity kind. These types mirror the JSON exactly; reconciliation logic
//! lives elsewhere.

pub mod bulk;
pub mod permission;
pub mod record;
pub mod rrset;
pub mod user;
pub mod zone;

pub use bulk::{BulkOperation, BulkRequest, BulkResponse, BulkUpdate};
pub use permission::Permission;
pub use record::{CreateRecordRequest, Record, UpdateRecordRequest};
pub use rrset::{RRSet, RRSetRecord, ReplaceRRSetRequest};
pub use user::{CreateUserRequest, DeleteUserRequest, UpdateUserRequest, User};
pub use zone::{CreateZoneRequest, UpdateZoneRequest, Zone, ZoneType};

/// Lenient deserializers for fields the API encodes inconsistently
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept `true`/`false`, `0`/`1`, `"0"`/`"1"`, `"true"`/`"false"` and `null`
    pub fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => Ok(false),
                "1" | "true" | "yes" => Ok(true),
                other => Err(serde::de::Error::custom(format!(
                    "invalid boolean value '{}'",
                    other
                ))),
            },
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value {}",
                other
            ))),
        }
    }

    /// Like [`flexible_bool`] but `null`/missing means `true`
    pub fn flexible_bool_default_true<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<bool, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(true),
            Some(v) => flexible_bool(v).map_err(serde::de::Error::custom),
        }
    }

    /// `null` becomes the empty string
    pub fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// `null` or negative becomes zero
    pub fn nullable_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
        Ok(u32::try_from(value).unwrap_or(0))
    }

    /// `0`/`null` means "no reference"
    pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.filter(|id| *id != 0))
    }

    /// A list of messages; structured entries are kept as their JSON text
    pub fn message_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let entries = match value {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(single) => vec![single],
        };
        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect())
    }

}
