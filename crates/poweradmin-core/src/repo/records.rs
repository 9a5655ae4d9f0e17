//! Record repository

use super::{Echo, with_type_filter};
use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::record::{CreateRecordRequest, Record, RecordEnvelope, RecordList, UpdateRecordRequest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RecordCreated {
    #[serde(default, alias = "id")]
    record_id: Option<i64>,
    #[serde(default)]
    record: Option<Record>,
}

/// Record operations, nested under a zone
#[derive(Debug, Clone)]
pub struct RecordRepository {
    client: ApiClient,
}

impl RecordRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(zone_id: i64) -> String {
        format!("zones/{}/records", zone_id)
    }

    /// `GET zones/{zone}/records/{id}`
    pub async fn get(&self, ctx: &RequestContext, zone_id: i64, id: i64) -> Result<Record> {
        let envelope: RecordEnvelope = self
            .client
            .get_required(ctx, &format!("{}/{}", Self::path(zone_id), id))
            .await?;
        envelope.record.ok_or_else(|| {
            Error::invalid_response(format!("record {}/{} missing from response", zone_id, id))
        })
    }

    /// `GET zones/{zone}/records[?type=T]` (single page)
    pub async fn list(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        rtype: Option<&str>,
    ) -> Result<Vec<Record>> {
        let path = with_type_filter(Self::path(zone_id), rtype);
        let list: Option<RecordList> = self.client.get(ctx, &path).await?;
        Ok(list.map(RecordList::into_records).unwrap_or_default())
    }

    /// `POST zones/{zone}/records`
    pub async fn create(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        request: &CreateRecordRequest,
    ) -> Result<Echo<Record>> {
        let created: Option<RecordCreated> =
            self.client.post(ctx, &Self::path(zone_id), request).await?;
        Ok(match created {
            Some(RecordCreated { record: Some(record), .. }) => Echo::Entity(record),
            Some(RecordCreated { record_id: Some(id), .. }) => Echo::Id(id),
            _ => Echo::Nothing,
        })
    }

    /// `PUT zones/{zone}/records/{id}`
    pub async fn update(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        id: i64,
        request: &UpdateRecordRequest,
    ) -> Result<Option<Record>> {
        let envelope: Option<RecordEnvelope> = self
            .client
            .put(ctx, &format!("{}/{}", Self::path(zone_id), id), request)
            .await?;
        Ok(envelope.and_then(|e| e.record))
    }

    /// `DELETE zones/{zone}/records/{id}`
    pub async fn delete(&self, ctx: &RequestContext, zone_id: i64, id: i64) -> Result<()> {
        self.client
            .delete(ctx, &format!("{}/{}", Self::path(zone_id), id), None)
            .await
    }
}
