//! Zone wire types

use super::de;
use crate::envelope::Pagination;
use crate::error::Error;
use crate::field::Optional;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Replication role of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneType {
    #[default]
    #[serde(alias = "master", alias = "Master")]
    Master,
    #[serde(alias = "slave", alias = "Slave")]
    Slave,
    #[serde(alias = "native", alias = "Native")]
    Native,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Master => "MASTER",
            ZoneType::Slave => "SLAVE",
            ZoneType::Native => "NATIVE",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MASTER" => Ok(ZoneType::Master),
            "SLAVE" => Ok(ZoneType::Slave),
            "NATIVE" => Ok(ZoneType::Native),
            _ => Err(Error::validation(format!(
                "invalid zone type '{}' (expected MASTER, SLAVE or NATIVE)",
                s
            ))),
        }
    }
}

/// A zone as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub zone_type: ZoneType,
    /// Comma-separated `host[:port]` list
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub masters: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub account: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(default)]
    pub soa_serial: Option<i64>,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub dnssec_signed: bool,
}

impl Zone {
    /// Masters as an ordered list
    pub fn masters_list(&self) -> Vec<String> {
        split_masters(&self.masters)
    }
}

/// Split the wire form of a masters list
pub fn split_masters(masters: &str) -> Vec<String> {
    masters
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a masters list into its wire form
pub fn join_masters(masters: &[String]) -> String {
    masters.join(",")
}

/// `POST zones`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateZoneRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// `PUT zones/{id}`; absent keys leave the remote value unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateZoneRequest {
    #[serde(rename = "type", skip_serializing_if = "Optional::is_absent")]
    pub zone_type: Optional<ZoneType>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub masters: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub account: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub description: Optional<String>,
}

/// `data` of a successful `POST zones`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateZoneResponse {
    #[serde(alias = "id")]
    pub zone_id: i64,
}

/// `data` of `GET zones/{id}` and `PUT zones/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneEnvelope {
    #[serde(default)]
    pub zone: Option<Zone>,
}

/// `data` of `GET zones`
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneList {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
