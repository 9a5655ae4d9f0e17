//! RRSet lifecycle
//!
//! Create and update share one path: the full desired member list is
//! submitted through [`RRSetReconciler::apply`] and the re-read snapshot
//! becomes the applied state.

use super::{Lifecycle, ReadOutcome, ResourceKind, deleted_if_not_found, ensure_in_place};
use crate::context::RequestContext;
use crate::error::Result;
use crate::field::Field;
use crate::import;
use crate::model::record::DEFAULT_TTL;
use crate::rrset::{RRSetKey, RRSetMember, RRSetReconciler, RRSetSnapshot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

/// A declared member; omitted flags take their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub content: String,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub priority: Option<u32>,
}

impl MemberSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: None,
            priority: None,
        }
    }

    fn resolve(&self) -> RRSetMember {
        RRSetMember {
            content: self.content.clone(),
            disabled: self.disabled.unwrap_or(false),
            priority: self.priority.unwrap_or(0),
        }
    }
}

/// Declared RRSet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRSetSpec {
    pub key: RRSetKey,
    pub ttl: Field<u32>,
    pub records: Vec<MemberSpec>,
}

impl RRSetSpec {
    pub fn new(key: RRSetKey, records: Vec<MemberSpec>) -> Self {
        Self {
            key,
            ttl: Field::Unknown,
            records,
        }
    }

    /// The desired member set
    pub fn members(&self) -> BTreeSet<RRSetMember> {
        self.records.iter().map(MemberSpec::resolve).collect()
    }

    /// The desired TTL; undeclared means the server default
    pub fn effective_ttl(&self) -> u32 {
        self.ttl.or_default_value(DEFAULT_TTL)
    }
}

/// Fields whose change forces a new set
pub fn requires_replacement(prior: &RRSetSnapshot, desired: &RRSetSpec) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if prior.key.zone_id != desired.key.zone_id {
        changed.push("zone_id");
    }
    if prior.key.name != desired.key.name {
        changed.push("name");
    }
    if prior.key.rtype != desired.key.rtype {
        changed.push("type");
    }
    changed
}

/// RRSet lifecycle over the reconciler
#[derive(Debug, Clone)]
pub struct RRSetLifecycle {
    reconciler: RRSetReconciler,
}

impl RRSetLifecycle {
    pub fn new(reconciler: RRSetReconciler) -> Self {
        Self { reconciler }
    }
}

#[async_trait]
impl Lifecycle for RRSetLifecycle {
    type Desired = RRSetSpec;
    type State = RRSetSnapshot;
    type Identity = RRSetKey;

    const KIND: ResourceKind = ResourceKind::RRSet;

    async fn create(&self, ctx: &RequestContext, desired: &RRSetSpec) -> Result<RRSetSnapshot> {
        let snapshot = self
            .reconciler
            .apply(ctx, &desired.key, desired.effective_ttl(), &desired.members())
            .await
            .map_err(|e| e.context(Self::KIND, desired.key.to_string()))?;
        trace!(rrset = %desired.key, members = snapshot.members.len(), "RRSet created");
        Ok(snapshot)
    }

    async fn read(&self, ctx: &RequestContext, current: &RRSetSnapshot) -> Result<ReadOutcome<RRSetSnapshot>> {
        match self.reconciler.fetch(ctx, &current.key).await {
            Ok(Some(snapshot)) => Ok(ReadOutcome::Present(snapshot)),
            Ok(None) => {
                tracing::info!(rrset = %current.key, "RRSet no longer exists remotely");
                Ok(ReadOutcome::Absent)
            }
            Err(e) => Err(e.context(Self::KIND, current.key.to_string())),
        }
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        current: &RRSetSnapshot,
        desired: &RRSetSpec,
    ) -> Result<RRSetSnapshot> {
        let identity = current.key.to_string();
        ensure_in_place(Self::KIND, &identity, &requires_replacement(current, desired))?;

        let snapshot = self
            .reconciler
            .apply(ctx, &desired.key, desired.effective_ttl(), &desired.members())
            .await
            .map_err(|e| e.context(Self::KIND, &identity))?;
        trace!(rrset = %identity, members = snapshot.members.len(), "RRSet replaced");
        Ok(snapshot)
    }

    async fn delete(&self, ctx: &RequestContext, current: &RRSetSnapshot) -> Result<()> {
        let identity = current.key.to_string();
        deleted_if_not_found(Self::KIND, &identity, self.reconciler.remove(ctx, &current.key).await)
    }

    async fn import(&self, _ctx: &RequestContext, external_id: &str) -> Result<RRSetKey> {
        import::parse_rrset(external_id)
    }

    fn from_identity(key: RRSetKey) -> RRSetSnapshot {
        RRSetSnapshot {
            key,
            ttl: DEFAULT_TTL,
            members: BTreeSet::new(),
        }
    }
}
