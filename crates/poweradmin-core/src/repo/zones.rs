//! Zone repository

use super::Echo;
use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::zone::{CreateZoneRequest, UpdateZoneRequest, Zone, ZoneEnvelope, ZoneList};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ZoneCreated {
    #[serde(default, alias = "id")]
    zone_id: Option<i64>,
    #[serde(default)]
    zone: Option<Zone>,
}

/// Zone operations
#[derive(Debug, Clone)]
pub struct ZoneRepository {
    client: ApiClient,
}

impl ZoneRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET zones/{id}`
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> Result<Zone> {
        let envelope: ZoneEnvelope = self.client.get_required(ctx, &format!("zones/{}", id)).await?;
        envelope
            .zone
            .ok_or_else(|| Error::invalid_response(format!("zone {} missing from response", id)))
    }

    /// `GET zones` (single page)
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Zone>> {
        let list: Option<ZoneList> = self.client.get(ctx, "zones").await?;
        Ok(list.map(|l| l.zones).unwrap_or_default())
    }

    /// `POST zones`
    pub async fn create(&self, ctx: &RequestContext, request: &CreateZoneRequest) -> Result<Echo<Zone>> {
        let created: Option<ZoneCreated> = self.client.post(ctx, "zones", request).await?;
        Ok(match created {
            Some(ZoneCreated { zone: Some(zone), .. }) => Echo::Entity(zone),
            Some(ZoneCreated { zone_id: Some(id), .. }) => Echo::Id(id),
            _ => Echo::Nothing,
        })
    }

    /// `PUT zones/{id}`
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        request: &UpdateZoneRequest,
    ) -> Result<Option<Zone>> {
        let envelope: Option<ZoneEnvelope> =
            self.client.put(ctx, &format!("zones/{}", id), request).await?;
        Ok(envelope.and_then(|e| e.zone))
    }

    /// `DELETE zones/{id}`
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        self.client.delete(ctx, &format!("zones/{}", id), None).await
    }

    /// First zone whose name matches exactly
    ///
    /// A miss is reported as `NotFound` after filtering the full list
    /// locally; it is not a server 404.
    pub async fn find_by_name(&self, ctx: &RequestContext, name: &str) -> Result<Zone> {
        self.list(ctx)
            .await?
            .into_iter()
            .find(|zone| zone.name == name)
            .ok_or_else(|| Error::not_found(format!("no zone named '{}' in the zone list", name)))
    }
}
