//! Zone lifecycle

use super::{
    Lifecycle, ReadOutcome, ResourceKind, absent_if_not_found, deleted_if_not_found, ensure_in_place,
    read_back,
};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::import::{self, ZoneRef};
use crate::model::zone::{CreateZoneRequest, UpdateZoneRequest, Zone, ZoneType, join_masters};
use crate::repo::{Echo, ZoneRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Declared zone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSpec {
    /// Immutable after creation
    pub name: String,
    pub zone_type: ZoneType,
    /// Required for SLAVE zones, ignored by the server otherwise
    pub masters: Field<Vec<String>>,
    pub account: Field<String>,
    pub description: Field<String>,
    /// Template applied at creation; never read back
    pub template: Option<String>,
}

impl ZoneSpec {
    pub fn new(name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            name: name.into(),
            zone_type,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("zone name cannot be empty"));
        }
        let has_masters = self.masters.value().is_some_and(|m| !m.is_empty());
        if self.zone_type == ZoneType::Slave && !has_masters {
            return Err(Error::validation(format!(
                "zone {}: masters are required for SLAVE zones",
                self.name
            )));
        }
        if self.zone_type != ZoneType::Slave && has_masters {
            warn!(zone = %self.name, zone_type = %self.zone_type, "Masters are only used by SLAVE zones");
        }
        Ok(())
    }
}

/// Applied zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    pub id: i64,
    pub name: String,
    pub zone_type: ZoneType,
    #[serde(default)]
    pub masters: Vec<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// SOA serial, computed by the server
    #[serde(default)]
    pub serial: Option<i64>,
    #[serde(default)]
    pub dnssec_signed: bool,
    /// Carried over from the declaration that created the zone
    #[serde(default)]
    pub template: Option<String>,
}

impl ZoneState {
    fn project(zone: Zone, template: Option<String>) -> Self {
        let masters = zone.masters_list();
        Self {
            id: zone.id,
            name: zone.name,
            zone_type: zone.zone_type,
            masters,
            account: non_empty(zone.account),
            description: non_empty(zone.description),
            serial: zone.soa_serial,
            dnssec_signed: zone.dnssec_signed,
            template,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Fields whose change forces a new zone
pub fn requires_replacement(prior: &ZoneState, desired: &ZoneSpec) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if prior.name != desired.name {
        changed.push("name");
    }
    changed
}

/// Zone lifecycle over the zone repository
#[derive(Debug, Clone)]
pub struct ZoneLifecycle {
    zones: ZoneRepository,
}

impl ZoneLifecycle {
    pub fn new(zones: ZoneRepository) -> Self {
        Self { zones }
    }
}

#[async_trait]
impl Lifecycle for ZoneLifecycle {
    type Desired = ZoneSpec;
    type State = ZoneState;
    type Identity = i64;

    const KIND: ResourceKind = ResourceKind::Zone;

    async fn create(&self, ctx: &RequestContext, desired: &ZoneSpec) -> Result<ZoneState> {
        desired.validate()?;

        let request = CreateZoneRequest {
            name: desired.name.clone(),
            zone_type: desired.zone_type,
            masters: desired
                .masters
                .value()
                .filter(|m| !m.is_empty())
                .map(|m| join_masters(m)),
            account: desired.account.value().cloned(),
            description: desired.description.value().cloned(),
            template: desired.template.clone(),
        };

        let echo = self
            .zones
            .create(ctx, &request)
            .await
            .map_err(|e| e.context(Self::KIND, &desired.name))?;

        let zone = match echo {
            Echo::Entity(zone) => zone,
            Echo::Id(id) => read_back(Self::KIND, &desired.name, self.zones.get(ctx, id)).await?,
            Echo::Nothing => {
                read_back(Self::KIND, &desired.name, self.zones.find_by_name(ctx, &desired.name)).await?
            }
        };

        trace!(zone = %zone.name, id = zone.id, "Zone created");
        Ok(ZoneState::project(zone, desired.template.clone()))
    }

    async fn read(&self, ctx: &RequestContext, current: &ZoneState) -> Result<ReadOutcome<ZoneState>> {
        let identity = current.id.to_string();
        let outcome = absent_if_not_found(Self::KIND, &identity, self.zones.get(ctx, current.id).await)?;
        Ok(outcome.map(|zone| ZoneState::project(zone, current.template.clone())))
    }

    async fn update(&self, ctx: &RequestContext, current: &ZoneState, desired: &ZoneSpec) -> Result<ZoneState> {
        let identity = current.id.to_string();
        ensure_in_place(Self::KIND, &identity, &requires_replacement(current, desired))?;
        desired.validate()?;

        let request = UpdateZoneRequest {
            zone_type: desired.zone_type.into(),
            masters: desired.masters.as_ref().map(|m| join_masters(m)).encode(),
            account: desired.account.encode(),
            description: desired.description.encode(),
        };

        let echoed = self
            .zones
            .update(ctx, current.id, &request)
            .await
            .map_err(|e| e.context(Self::KIND, &identity))?;

        let zone = match echoed {
            Some(zone) => zone,
            None => read_back(Self::KIND, &identity, self.zones.get(ctx, current.id)).await?,
        };

        trace!(zone = %zone.name, id = zone.id, "Zone updated");
        Ok(ZoneState::project(zone, current.template.clone()))
    }

    async fn delete(&self, ctx: &RequestContext, current: &ZoneState) -> Result<()> {
        let identity = current.id.to_string();
        deleted_if_not_found(Self::KIND, &identity, self.zones.delete(ctx, current.id).await)
    }

    async fn import(&self, ctx: &RequestContext, external_id: &str) -> Result<i64> {
        match import::parse_zone(external_id)? {
            ZoneRef::Id(id) => Ok(id),
            ZoneRef::Name(name) => self
                .zones
                .find_by_name(ctx, &name)
                .await
                .map(|zone| zone.id)
                .map_err(|e| e.context(Self::KIND, name)),
        }
    }

    fn from_identity(id: i64) -> ZoneState {
        ZoneState {
            id,
            name: String::new(),
            zone_type: ZoneType::default(),
            masters: Vec::new(),
            account: None,
            description: None,
            serial: None,
            dnssec_signed: false,
            template: None,
        }
    }
}
