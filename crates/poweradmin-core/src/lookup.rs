//! Read-only lookups
//!
//! Queries for entities the caller references but does not manage. Every
//! call re-fetches; nothing is cached between calls.

use crate::context::RequestContext;
use crate::error::Result;
use crate::import::ZoneRef;
use crate::model::{Permission, RRSet, Record, User, Zone};
use crate::repo::Repositories;

/// Permission selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRef {
    Id(i64),
    Name(String),
}

/// Filters applied to a zone's record list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Sent to the server as `?type=`
    pub rtype: Option<String>,
    /// Exact match, applied locally
    pub name: Option<String>,
}

/// Lookup entry points
#[derive(Debug, Clone)]
pub struct Lookups {
    repos: Repositories,
}

impl Lookups {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// A zone by id, or the first zone whose name matches exactly
    pub async fn zone(&self, ctx: &RequestContext, zone: &ZoneRef) -> Result<Zone> {
        match zone {
            ZoneRef::Id(id) => self.repos.zones.get(ctx, *id).await,
            ZoneRef::Name(name) => self.repos.zones.find_by_name(ctx, name).await,
        }
    }

    /// All zones on the first page
    pub async fn zones(&self, ctx: &RequestContext) -> Result<Vec<Zone>> {
        self.repos.zones.list(ctx).await
    }

    /// Records of a zone
    pub async fn records(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        filter: &RecordFilter,
    ) -> Result<Vec<Record>> {
        let records = self
            .repos
            .records
            .list(ctx, zone_id, filter.rtype.as_deref())
            .await?;
        Ok(match &filter.name {
            Some(name) => records.into_iter().filter(|r| &r.name == name).collect(),
            None => records,
        })
    }

    /// RRSets of a zone, optionally of one type
    pub async fn rrsets(&self, ctx: &RequestContext, zone_id: i64, rtype: Option<&str>) -> Result<Vec<RRSet>> {
        self.repos.rrsets.list(ctx, zone_id, rtype).await
    }

    /// A permission by id or by exact name
    pub async fn permission(&self, ctx: &RequestContext, permission: &PermissionRef) -> Result<Permission> {
        match permission {
            PermissionRef::Id(id) => self.repos.permissions.get(ctx, *id).await,
            PermissionRef::Name(name) => self.repos.permissions.find_by_name(ctx, name).await,
        }
    }

    /// All permissions
    pub async fn permissions(&self, ctx: &RequestContext) -> Result<Vec<Permission>> {
        self.repos.permissions.list(ctx).await
    }

    /// A user by exact username
    pub async fn user(&self, ctx: &RequestContext, username: &str) -> Result<User> {
        self.repos.users.find_by_username(ctx, username).await
    }
}
