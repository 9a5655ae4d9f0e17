//! Static resource registry
//!
//! Maps every entity kind to its lifecycle implementation. Dispatch is a
//! `match` over the [`Desired`] / [`Applied`] sum types, so adding a kind
//! means adding a variant and the compiler points at every place to extend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poweradmin_core::{ApiClient, Applied, Desired, RequestContext, ResourceRegistry};
//!
//! let registry = ResourceRegistry::new(ApiClient::new(transport));
//! let ctx = RequestContext::background();
//!
//! let applied = registry.create(&ctx, &Desired::Zone(spec)).await?;
//! let persisted = serde_json::to_string(&applied)?;
//! ```

use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::repo::Repositories;
use crate::resources::{
    Lifecycle, ReadOutcome, RecordLifecycle, RecordSpec, RecordState, ResourceKind, RRSetLifecycle,
    RRSetSpec, UserLifecycle, UserSpec, UserState, ZoneLifecycle, ZoneSpec, ZoneState,
};
use crate::rrset::{RRSetReconciler, RRSetSnapshot};
use serde::{Deserialize, Serialize};

/// Declared configuration of any entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Desired {
    Zone(ZoneSpec),
    Record(RecordSpec),
    RRSet(RRSetSpec),
    User(UserSpec),
}

/// Applied state of any entity kind, as persisted by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum Applied {
    Zone(ZoneState),
    Record(RecordState),
    #[serde(rename = "rrset")]
    RRSet(RRSetSnapshot),
    User(UserState),
}

impl Desired {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Desired::Zone(_) => ResourceKind::Zone,
            Desired::Record(_) => ResourceKind::Record,
            Desired::RRSet(_) => ResourceKind::RRSet,
            Desired::User(_) => ResourceKind::User,
        }
    }
}

impl Applied {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Applied::Zone(_) => ResourceKind::Zone,
            Applied::Record(_) => ResourceKind::Record,
            Applied::RRSet(_) => ResourceKind::RRSet,
            Applied::User(_) => ResourceKind::User,
        }
    }

    /// Identity in import-id form
    pub fn identity(&self) -> String {
        match self {
            Applied::Zone(state) => state.id.to_string(),
            Applied::Record(state) => state.identity().to_string(),
            Applied::RRSet(state) => state.key.to_string(),
            Applied::User(state) => state.id.to_string(),
        }
    }
}

/// Lifecycle implementations of every entity kind
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    zones: ZoneLifecycle,
    records: RecordLifecycle,
    rrsets: RRSetLifecycle,
    users: UserLifecycle,
}

impl ResourceRegistry {
    /// Build every lifecycle over one shared client
    pub fn new(client: ApiClient) -> Self {
        let repos = Repositories::new(client);
        Self {
            zones: ZoneLifecycle::new(repos.zones),
            records: RecordLifecycle::new(repos.records),
            rrsets: RRSetLifecycle::new(RRSetReconciler::new(repos.rrsets)),
            users: UserLifecycle::new(repos.users),
        }
    }

    pub fn zones(&self) -> &ZoneLifecycle {
        &self.zones
    }

    pub fn records(&self) -> &RecordLifecycle {
        &self.records
    }

    pub fn rrsets(&self) -> &RRSetLifecycle {
        &self.rrsets
    }

    pub fn users(&self) -> &UserLifecycle {
        &self.users
    }

    pub async fn create(&self, ctx: &RequestContext, desired: &Desired) -> Result<Applied> {
        Ok(match desired {
            Desired::Zone(spec) => Applied::Zone(self.zones.create(ctx, spec).await?),
            Desired::Record(spec) => Applied::Record(self.records.create(ctx, spec).await?),
            Desired::RRSet(spec) => Applied::RRSet(self.rrsets.create(ctx, spec).await?),
            Desired::User(spec) => Applied::User(self.users.create(ctx, spec).await?),
        })
    }

    pub async fn read(&self, ctx: &RequestContext, current: &Applied) -> Result<ReadOutcome<Applied>> {
        Ok(match current {
            Applied::Zone(state) => self.zones.read(ctx, state).await?.map(Applied::Zone),
            Applied::Record(state) => self.records.read(ctx, state).await?.map(Applied::Record),
            Applied::RRSet(state) => self.rrsets.read(ctx, state).await?.map(Applied::RRSet),
            Applied::User(state) => self.users.read(ctx, state).await?.map(Applied::User),
        })
    }

    /// Update; `current` and `desired` must be of the same kind
    pub async fn update(&self, ctx: &RequestContext, current: &Applied, desired: &Desired) -> Result<Applied> {
        Ok(match (current, desired) {
            (Applied::Zone(state), Desired::Zone(spec)) => Applied::Zone(self.zones.update(ctx, state, spec).await?),
            (Applied::Record(state), Desired::Record(spec)) => {
                Applied::Record(self.records.update(ctx, state, spec).await?)
            }
            (Applied::RRSet(state), Desired::RRSet(spec)) => {
                Applied::RRSet(self.rrsets.update(ctx, state, spec).await?)
            }
            (Applied::User(state), Desired::User(spec)) => Applied::User(self.users.update(ctx, state, spec).await?),
            (current, desired) => {
                return Err(Error::validation(format!(
                    "cannot update a {} from a {} declaration",
                    current.kind(),
                    desired.kind()
                )));
            }
        })
    }

    pub async fn delete(&self, ctx: &RequestContext, current: &Applied) -> Result<()> {
        match current {
            Applied::Zone(state) => self.zones.delete(ctx, state).await,
            Applied::Record(state) => self.records.delete(ctx, state).await,
            Applied::RRSet(state) => self.rrsets.delete(ctx, state).await,
            Applied::User(state) => self.users.delete(ctx, state).await,
        }
    }

    /// Import an external id; the result carries identity fields only
    pub async fn import(&self, ctx: &RequestContext, kind: ResourceKind, external_id: &str) -> Result<Applied> {
        Ok(match kind {
            ResourceKind::Zone => Applied::Zone(ZoneLifecycle::from_identity(
                self.zones.import(ctx, external_id).await?,
            )),
            ResourceKind::Record => Applied::Record(RecordLifecycle::from_identity(
                self.records.import(ctx, external_id).await?,
            )),
            ResourceKind::RRSet => Applied::RRSet(RRSetLifecycle::from_identity(
                self.rrsets.import(ctx, external_id).await?,
            )),
            ResourceKind::User => Applied::User(UserLifecycle::from_identity(
                self.users.import(ctx, external_id).await?,
            )),
        })
    }

    /// Import, then read the rest of the entity
    pub async fn import_and_read(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        external_id: &str,
    ) -> Result<ReadOutcome<Applied>> {
        let identity = self.import(ctx, kind, external_id).await?;
        self.read(ctx, &identity).await
    }
}
