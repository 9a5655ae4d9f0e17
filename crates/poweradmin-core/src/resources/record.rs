//! Record lifecycle

use super::{
    Lifecycle, ReadOutcome, ResourceKind, absent_if_not_found, deleted_if_not_found, ensure_in_place,
    read_back,
};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::field::{Field, Optional};
use crate::import::{self, RecordId};
use crate::model::record::{CreateRecordRequest, DEFAULT_TTL, Record, UpdateRecordRequest};
use crate::repo::{Echo, RecordRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Declared record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSpec {
    /// Immutable after creation
    pub zone_id: i64,
    pub name: String,
    pub rtype: String,
    pub content: String,
    pub ttl: Field<u32>,
    pub priority: Field<u32>,
    pub disabled: Field<bool>,
    /// Create the matching PTR record; only sent at creation
    pub create_ptr: bool,
}

impl RecordSpec {
    pub fn new(
        zone_id: i64,
        name: impl Into<String>,
        rtype: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            zone_id,
            name: name.into(),
            rtype: rtype.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("record name cannot be empty"));
        }
        if self.rtype.is_empty() {
            return Err(Error::validation("record type cannot be empty"));
        }
        if self.content.is_empty() {
            return Err(Error::validation("record content cannot be empty"));
        }
        Ok(())
    }

    /// Delta payload: required fields always written, optional ones per
    /// their declared state
    pub fn to_update(&self) -> UpdateRecordRequest {
        UpdateRecordRequest {
            name: Optional::Present(self.name.clone()),
            rtype: Optional::Present(self.rtype.clone()),
            content: Optional::Present(self.content.clone()),
            ttl: self.ttl.encode_or(DEFAULT_TTL),
            priority: self.priority.encode(),
            disabled: self.disabled.encode(),
        }
    }
}

/// Applied record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    pub id: i64,
    pub zone_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub content: String,
    pub ttl: u32,
    pub priority: u32,
    pub disabled: bool,
    /// Never returned by the server; kept from the prior declaration
    #[serde(default)]
    pub create_ptr: bool,
}

impl RecordState {
    pub fn identity(&self) -> RecordId {
        RecordId {
            zone_id: self.zone_id,
            record_id: self.id,
        }
    }

    fn project(record: Record, zone_id: i64, create_ptr: bool) -> Self {
        Self {
            id: record.id,
            // Some server versions omit zone_id on nested reads
            zone_id: if record.zone_id != 0 { record.zone_id } else { zone_id },
            name: record.name,
            rtype: record.rtype,
            content: record.content,
            ttl: record.ttl,
            priority: record.priority,
            disabled: record.disabled,
            create_ptr,
        }
    }
}

/// Fields whose change forces a new record
pub fn requires_replacement(prior: &RecordState, desired: &RecordSpec) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if prior.zone_id != desired.zone_id {
        changed.push("zone_id");
    }
    if prior.create_ptr != desired.create_ptr {
        changed.push("create_ptr");
    }
    changed
}

/// Record lifecycle over the record repository
#[derive(Debug, Clone)]
pub struct RecordLifecycle {
    records: RecordRepository,
}

impl RecordLifecycle {
    pub fn new(records: RecordRepository) -> Self {
        Self { records }
    }

    /// Find a freshly created record when the server did not echo its id
    async fn locate(&self, ctx: &RequestContext, desired: &RecordSpec) -> Result<Record> {
        self.records
            .list(ctx, desired.zone_id, Some(desired.rtype.as_str()))
            .await?
            .into_iter()
            .filter(|r| r.name == desired.name && r.rtype == desired.rtype && r.content == desired.content)
            .max_by_key(|r| r.id)
            .ok_or_else(|| {
                Error::not_found(format!(
                    "created record {} {} {} not listed",
                    desired.name, desired.rtype, desired.content
                ))
            })
    }
}

#[async_trait]
impl Lifecycle for RecordLifecycle {
    type Desired = RecordSpec;
    type State = RecordState;
    type Identity = RecordId;

    const KIND: ResourceKind = ResourceKind::Record;

    async fn create(&self, ctx: &RequestContext, desired: &RecordSpec) -> Result<RecordState> {
        desired.validate()?;
        let label = format!("{}/{} {}", desired.zone_id, desired.name, desired.rtype);

        let request = CreateRecordRequest {
            name: desired.name.clone(),
            rtype: desired.rtype.clone(),
            content: desired.content.clone(),
            ttl: desired.ttl.or_default_value(DEFAULT_TTL),
            priority: desired.priority.or_default_value(0),
            disabled: desired.disabled.or_default_value(false),
            create_ptr: desired.create_ptr,
        };

        let echo = self
            .records
            .create(ctx, desired.zone_id, &request)
            .await
            .map_err(|e| e.context(Self::KIND, &label))?;

        let record = match echo {
            Echo::Entity(record) => record,
            Echo::Id(id) => read_back(Self::KIND, &label, self.records.get(ctx, desired.zone_id, id)).await?,
            Echo::Nothing => read_back(Self::KIND, &label, self.locate(ctx, desired)).await?,
        };

        trace!(record = %label, id = record.id, "Record created");
        Ok(RecordState::project(record, desired.zone_id, desired.create_ptr))
    }

    async fn read(&self, ctx: &RequestContext, current: &RecordState) -> Result<ReadOutcome<RecordState>> {
        let identity = current.identity().to_string();
        let result = self.records.get(ctx, current.zone_id, current.id).await;
        Ok(absent_if_not_found(Self::KIND, &identity, result)?
            .map(|record| RecordState::project(record, current.zone_id, current.create_ptr)))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        current: &RecordState,
        desired: &RecordSpec,
    ) -> Result<RecordState> {
        let identity = current.identity().to_string();
        ensure_in_place(Self::KIND, &identity, &requires_replacement(current, desired))?;
        desired.validate()?;

        let echoed = self
            .records
            .update(ctx, current.zone_id, current.id, &desired.to_update())
            .await
            .map_err(|e| e.context(Self::KIND, &identity))?;

        let record = match echoed {
            Some(record) => record,
            None => read_back(Self::KIND, &identity, self.records.get(ctx, current.zone_id, current.id)).await?,
        };

        trace!(record = %identity, "Record updated");
        Ok(RecordState::project(record, current.zone_id, desired.create_ptr))
    }

    async fn delete(&self, ctx: &RequestContext, current: &RecordState) -> Result<()> {
        let identity = current.identity().to_string();
        let result = self.records.delete(ctx, current.zone_id, current.id).await;
        deleted_if_not_found(Self::KIND, &identity, result)
    }

    async fn import(&self, _ctx: &RequestContext, external_id: &str) -> Result<RecordId> {
        import::parse_record(external_id)
    }

    fn from_identity(identity: RecordId) -> RecordState {
        RecordState {
            id: identity.record_id,
            zone_id: identity.zone_id,
            name: String::new(),
            rtype: String::new(),
            content: String::new(),
            ttl: DEFAULT_TTL,
            priority: 0,
            disabled: false,
            create_ptr: false,
        }
    }
}
