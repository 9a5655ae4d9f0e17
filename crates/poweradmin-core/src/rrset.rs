//! RRSet reconciler
//!
//! An RRSet has no server-side identity. It is the group of records sharing
//! `(zone, name, type)`, and the remote API only offers a replace primitive
//! for it. The reconciler therefore:
//!
//! - always submits the complete desired member list, never a diff;
//! - re-reads the set after every write and treats that read, not the
//!   request, as authoritative (the server may reorder or default fields);
//! - compares member collections as sets.

use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::rrset::{RRSet, RRSetRecord, ReplaceRRSetRequest};
use crate::repo::RRSetRepository;
use crate::resources::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// Value-type identity of an RRSet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RRSetKey {
    pub zone_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
}

impl RRSetKey {
    pub fn new(zone_id: i64, name: impl Into<String>, rtype: impl Into<String>) -> Self {
        Self {
            zone_id,
            name: name.into(),
            rtype: rtype.into(),
        }
    }

    /// Reject keys that cannot address a set
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("rrset name cannot be empty"));
        }
        if self.rtype.is_empty() {
            return Err(Error::validation("rrset type cannot be empty"));
        }
        Ok(())
    }
}

impl fmt::Display for RRSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zone_id, self.name, self.rtype)
    }
}

/// One member of a set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RRSetMember {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub priority: u32,
}

impl RRSetMember {
    /// An enabled member with priority 0
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl From<RRSetRecord> for RRSetMember {
    fn from(record: RRSetRecord) -> Self {
        Self {
            content: record.content,
            disabled: record.disabled,
            priority: record.priority,
        }
    }
}

impl From<&RRSetMember> for RRSetRecord {
    fn from(member: &RRSetMember) -> Self {
        Self {
            content: member.content.clone(),
            disabled: member.disabled,
            priority: member.priority,
        }
    }
}

/// Authoritative state of a set as last read from the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSetSnapshot {
    pub key: RRSetKey,
    pub ttl: u32,
    pub members: BTreeSet<RRSetMember>,
}

impl RRSetSnapshot {
    fn from_wire(key: &RRSetKey, rrset: RRSet) -> Self {
        Self {
            key: key.clone(),
            ttl: rrset.ttl,
            members: rrset.records.into_iter().map(RRSetMember::from).collect(),
        }
    }

    /// True when this snapshot already holds `ttl` and exactly `members`
    pub fn matches(&self, ttl: u32, members: &BTreeSet<RRSetMember>) -> bool {
        self.ttl == ttl && &self.members == members
    }
}

/// Manages RRSets as atomic full-replace units
#[derive(Debug, Clone)]
pub struct RRSetReconciler {
    repo: RRSetRepository,
}

impl RRSetReconciler {
    pub fn new(repo: RRSetRepository) -> Self {
        Self { repo }
    }

    /// Replace the whole set, then read it back
    ///
    /// Create and update are the same operation. A failed read-back after a
    /// successful replace yields [`Error::Tainted`].
    pub async fn apply(
        &self,
        ctx: &RequestContext,
        key: &RRSetKey,
        ttl: u32,
        members: &BTreeSet<RRSetMember>,
    ) -> Result<RRSetSnapshot> {
        key.validate()?;
        if members.is_empty() {
            return Err(Error::validation(format!(
                "rrset {} must have at least one record",
                key
            )));
        }

        let request = ReplaceRRSetRequest {
            name: key.name.clone(),
            rtype: key.rtype.clone(),
            ttl,
            records: members.iter().map(RRSetRecord::from).collect(),
        };

        debug!(rrset = %key, ttl, members = members.len(), "Replacing rrset");
        self.repo.replace(ctx, key.zone_id, &request).await?;

        match self.fetch(ctx, key).await {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => Err(Error::not_found(format!("rrset {} absent after replace", key))
                .tainted(ResourceKind::RRSet, key.to_string())),
            Err(e) => Err(e.tainted(ResourceKind::RRSet, key.to_string())),
        }
    }

    /// Read the set; `None` when it does not exist or has no members
    pub async fn fetch(&self, ctx: &RequestContext, key: &RRSetKey) -> Result<Option<RRSetSnapshot>> {
        key.validate()?;
        match self.repo.get(ctx, key.zone_id, &key.name, &key.rtype).await {
            Ok(rrset) if rrset.records.is_empty() => Ok(None),
            Ok(rrset) => Ok(Some(RRSetSnapshot::from_wire(key, rrset))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove the whole set; an absent set is already removed
    pub async fn remove(&self, ctx: &RequestContext, key: &RRSetKey) -> Result<()> {
        key.validate()?;
        match self.repo.delete(ctx, key.zone_id, &key.name, &key.rtype).await {
            Err(e) if e.is_not_found() => {
                info!(rrset = %key, "RRSet already absent");
                Ok(())
            }
            other => other,
        }
    }
}
