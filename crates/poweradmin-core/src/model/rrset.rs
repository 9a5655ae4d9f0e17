//! RRSet wire types

use super::de;
use super::record::default_ttl;
use serde::{Deserialize, Serialize};

/// One member of an RRSet on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSetRecord {
    pub content: String,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "de::nullable_u32")]
    pub priority: u32,
}

/// An RRSet as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSet {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<RRSetRecord>,
}

/// `PUT zones/{id}/rrsets`: replaces every member of `(name, type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaceRRSetRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub ttl: u32,
    pub records: Vec<RRSetRecord>,
}

/// `data` of `GET zones/{id}/rrsets/{name}/{type}`
#[derive(Debug, Clone, Deserialize)]
pub struct RRSetEnvelope {
    #[serde(default)]
    pub rrset: Option<RRSet>,
}

/// `data` of `GET zones/{id}/rrsets`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RRSetList {
    Bare(Vec<RRSet>),
    Wrapped {
        #[serde(default)]
        rrsets: Vec<RRSet>,
    },
}

impl RRSetList {
    pub fn into_rrsets(self) -> Vec<RRSet> {
        match self {
            RRSetList::Bare(rrsets) => rrsets,
            RRSetList::Wrapped { rrsets } => rrsets,
        }
    }
}
