//! RRSet repository
//!
//! Name and type are used as literal path segments: they are the identity
//! of the set and are never re-encoded.

use super::with_type_filter;
use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::rrset::{RRSet, RRSetEnvelope, RRSetList, ReplaceRRSetRequest};

/// RRSet operations, nested under a zone
#[derive(Debug, Clone)]
pub struct RRSetRepository {
    client: ApiClient,
}

impl RRSetRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn key_path(zone_id: i64, name: &str, rtype: &str) -> String {
        format!("zones/{}/rrsets/{}/{}", zone_id, name, rtype)
    }

    /// `GET zones/{zone}/rrsets/{name}/{type}`
    pub async fn get(&self, ctx: &RequestContext, zone_id: i64, name: &str, rtype: &str) -> Result<RRSet> {
        let envelope: RRSetEnvelope = self
            .client
            .get_required(ctx, &Self::key_path(zone_id, name, rtype))
            .await?;
        envelope.rrset.ok_or_else(|| {
            Error::invalid_response(format!("rrset {}/{}/{} missing from response", zone_id, name, rtype))
        })
    }

    /// `GET zones/{zone}/rrsets[?type=T]`
    pub async fn list(&self, ctx: &RequestContext, zone_id: i64, rtype: Option<&str>) -> Result<Vec<RRSet>> {
        let path = with_type_filter(format!("zones/{}/rrsets", zone_id), rtype);
        let list: Option<RRSetList> = self.client.get(ctx, &path).await?;
        Ok(list.map(RRSetList::into_rrsets).unwrap_or_default())
    }

    /// `PUT zones/{zone}/rrsets`: replace every member of the set
    pub async fn replace(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        request: &ReplaceRRSetRequest,
    ) -> Result<()> {
        let _: Option<serde_json::Value> = self
            .client
            .put(ctx, &format!("zones/{}/rrsets", zone_id), request)
            .await?;
        Ok(())
    }

    /// `DELETE zones/{zone}/rrsets/{name}/{type}`
    pub async fn delete(&self, ctx: &RequestContext, zone_id: i64, name: &str, rtype: &str) -> Result<()> {
        self.client
            .delete(ctx, &Self::key_path(zone_id, name, rtype), None)
            .await
    }
}
