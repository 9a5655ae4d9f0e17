// # Resource Lifecycle Contracts
//
// Every managed entity kind implements [`Lifecycle`]: the
// Create/Read/Update/Delete/Import contract a host orchestrator drives.
//
// ## Contract
//
// - **Create**: build the create payload, write, project the authoritative
//   result (echo or follow-up read) into the applied state.
// - **Read**: fetch by identity. A not-found answer is `ReadOutcome::Absent`,
//   which tells the host to drop the entity, never an error.
// - **Update**: encode a delta, write, project the authoritative result.
//   Changes to replacement-forcing fields are rejected before any call.
// - **Delete**: not-found is success.
// - **Import**: parse an external id into identity fields only; a Read is
//   needed to populate the rest.
//
// A failed call never mutates the caller's state: lifecycle methods take
// prior state by reference and return new state by value.

pub mod record;
pub mod rrset;
pub mod user;
pub mod zone;

pub use record::{RecordLifecycle, RecordSpec, RecordState};
pub use rrset::{MemberSpec, RRSetLifecycle, RRSetSpec};
pub use user::{UserLifecycle, UserSpec, UserState};
pub use zone::{ZoneLifecycle, ZoneSpec, ZoneState};

use crate::context::RequestContext;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Zone,
    Record,
    #[serde(rename = "rrset")]
    RRSet,
    User,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Zone => "zone",
            ResourceKind::Record => "record",
            ResourceKind::RRSet => "rrset",
            ResourceKind::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zone" => Ok(ResourceKind::Zone),
            "record" => Ok(ResourceKind::Record),
            "rrset" => Ok(ResourceKind::RRSet),
            "user" => Ok(ResourceKind::User),
            _ => Err(Error::validation(format!(
                "unknown resource kind '{}' (expected zone, record, rrset or user)",
                s
            ))),
        }
    }
}

/// Result of a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// The entity exists; this is its current projection
    Present(T),
    /// The entity no longer exists remotely; drop it from tracked state
    Absent,
}

impl<T> ReadOutcome<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, ReadOutcome::Absent)
    }

    pub fn present(self) -> Option<T> {
        match self {
            ReadOutcome::Present(v) => Some(v),
            ReadOutcome::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        match self {
            ReadOutcome::Present(v) => ReadOutcome::Present(f(v)),
            ReadOutcome::Absent => ReadOutcome::Absent,
        }
    }
}

/// Lifecycle contract of one entity kind
///
/// # Thread Safety
///
/// Implementations hold no mutable state; concurrent calls on different
/// identities are safe. Calls on the same identity must be serialized by
/// the host.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Caller-declared configuration
    type Desired: Send + Sync;
    /// Applied state the host persists between calls
    type State: Send + Sync;
    /// Identity produced by import
    type Identity: Send + Sync;

    /// Entity kind
    const KIND: ResourceKind;

    /// Create the entity
    async fn create(&self, ctx: &RequestContext, desired: &Self::Desired) -> Result<Self::State>;

    /// Refresh the entity from the remote
    async fn read(&self, ctx: &RequestContext, current: &Self::State) -> Result<ReadOutcome<Self::State>>;

    /// Update the entity towards `desired`
    async fn update(
        &self,
        ctx: &RequestContext,
        current: &Self::State,
        desired: &Self::Desired,
    ) -> Result<Self::State>;

    /// Delete the entity; succeeds if it is already gone
    async fn delete(&self, ctx: &RequestContext, current: &Self::State) -> Result<()>;

    /// Resolve an external identifier into an identity
    async fn import(&self, ctx: &RequestContext, external_id: &str) -> Result<Self::Identity>;

    /// A state carrying only the identity, to be completed by [`Lifecycle::read`]
    fn from_identity(identity: Self::Identity) -> Self::State;
}

/// Run the authoritative follow-up read of a write
///
/// The write already succeeded, so any failure here means the local
/// projection is unknown.
pub(crate) async fn read_back<T, F>(kind: ResourceKind, identity: impl Into<String>, read: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let identity = identity.into();
    read.await.map_err(|e| e.tainted(kind, identity))
}

/// Convert not-found into the read outcome that drops tracked state
pub(crate) fn absent_if_not_found<T>(
    kind: ResourceKind,
    identity: &str,
    result: Result<T>,
) -> Result<ReadOutcome<T>> {
    match result {
        Ok(value) => Ok(ReadOutcome::Present(value)),
        Err(e) if e.is_not_found() => {
            tracing::info!(kind = %kind, identity, "Entity no longer exists remotely");
            Ok(ReadOutcome::Absent)
        }
        Err(e) => Err(e.context(kind, identity)),
    }
}

/// Convert not-found on delete into success
pub(crate) fn deleted_if_not_found(kind: ResourceKind, identity: &str, result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            tracing::info!(kind = %kind, identity, "Entity already absent");
            Ok(())
        }
        Err(e) => Err(e.context(kind, identity)),
    }
}

/// Reject an update that changes replacement-forcing fields
pub(crate) fn ensure_in_place(kind: ResourceKind, identity: &str, changed: &[&str]) -> Result<()> {
    if changed.is_empty() {
        return Ok(());
    }
    Err(Error::validation(format!(
        "changing {} requires replacing the {}",
        changed.join(", "),
        kind
    ))
    .context(kind, identity))
}

/// Tracked state of one managed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Not tracked
    Unmanaged,
    /// Declared, not yet created
    Planned,
    /// Identity known from an import; the projection is not read yet
    Imported,
    /// Created and projected
    Applied,
    /// Written remotely, but the projection is unknown
    Tainted,
    /// Deleted
    Destroyed,
}

/// A lifecycle step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Plan,
    Create,
    Read,
    Update,
    Delete,
    Import,
}

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The step completed
    Succeeded,
    /// The remote reported the entity as absent
    Absent,
    /// The write applied but could not be read back
    WrittenUnread,
    /// The step failed; nothing changed locally
    Failed,
}

impl StepOutcome {
    /// Classify a step result
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => StepOutcome::Succeeded,
            Err(e) => StepOutcome::from_error(e),
        }
    }

    /// Classify a failed step
    pub fn from_error(error: &Error) -> Self {
        if error.is_tainted() {
            StepOutcome::WrittenUnread
        } else if error.is_not_found() {
            StepOutcome::Absent
        } else {
            StepOutcome::Failed
        }
    }
}

impl LifecycleState {
    /// The state after `step` ended with `outcome`
    ///
    /// Returns `None` for steps that are not valid from this state.
    pub fn next(self, step: Step, outcome: StepOutcome) -> Option<LifecycleState> {
        use LifecycleState::*;
        use StepOutcome::*;

        match (self, step, outcome) {
            (Unmanaged | Destroyed, Step::Plan, _) => Some(Planned),
            (Planned | Imported | Applied | Tainted, Step::Plan, _) => Some(self),

            (Planned, Step::Create, Succeeded) => Some(Applied),
            (Planned, Step::Create, WrittenUnread) => Some(Tainted),
            (Planned, Step::Create, Failed | Absent) => Some(Planned),

            (Imported | Applied | Tainted, Step::Read, Succeeded) => Some(Applied),
            (Imported | Applied | Tainted, Step::Read, Absent) => Some(Unmanaged),
            (Imported | Applied | Tainted, Step::Read, Failed | WrittenUnread) => Some(self),

            (Applied, Step::Update, Succeeded) => Some(Applied),
            (Applied, Step::Update, WrittenUnread) => Some(Tainted),
            (Applied, Step::Update, Failed | Absent) => Some(Applied),

            (Imported | Applied | Tainted, Step::Delete, Succeeded | Absent) => Some(Destroyed),
            (Imported | Applied | Tainted, Step::Delete, Failed | WrittenUnread) => Some(self),

            (Unmanaged | Destroyed, Step::Import, Succeeded) => Some(Imported),
            (Unmanaged | Destroyed, Step::Import, _) => Some(self),

            _ => None,
        }
    }
}
