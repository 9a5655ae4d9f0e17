// # poweradmin-core
//
// Reconciliation engine for DNS objects managed through the Poweradmin API.
//
// ## Architecture Overview
//
// - **Transport**: trait for performing one HTTP exchange (see `poweradmin-http`)
// - **ApiClient**: versioned path prefixing, envelope decoding, status classification
// - **Repositories**: one-to-one entity operations (zones, records, RRSets, users, permissions)
// - **Field / Optional**: tri-state declared fields and presence-tagged payload values
// - **RRSetReconciler**: full-replace management of (zone, name, type) groups
// - **BulkClient**: all-or-nothing multi-operation submissions
// - **Lifecycle**: Create/Read/Update/Delete/Import contract per entity kind
// - **ResourceRegistry**: static dispatch over all entity kinds
//
// ## Design Principles
//
// 1. **Stateless**: every call re-fetches authoritative remote state
// 2. **No hidden retries**: one remote round trip per repository call
// 3. **Cancellable**: every remote call honors a `RequestContext`
// 4. **Idempotent tear-down**: deleting an absent entity succeeds

pub mod api;
pub mod bulk;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod field;
pub mod import;
pub mod lookup;
pub mod model;
pub mod registry;
pub mod repo;
pub mod resources;
pub mod rrset;
pub mod traits;

// Re-export core types for convenience
pub use api::ApiClient;
pub use bulk::{BulkClient, BulkOutcome};
pub use config::{AuthConfig, ClientConfig};
pub use context::{CancelHandle, RequestContext};
pub use error::{Error, ErrorCategory, Result};
pub use field::{Field, Optional};
pub use lookup::{Lookups, PermissionRef, RecordFilter};
pub use registry::{Applied, Desired, ResourceRegistry};
pub use repo::Repositories;
pub use resources::{
    Lifecycle, LifecycleState, MemberSpec, ReadOutcome, RecordSpec, RecordState, ResourceKind,
    RRSetSpec, Step, StepOutcome, UserSpec, UserState, ZoneSpec, ZoneState,
};
pub use rrset::{RRSetKey, RRSetMember, RRSetReconciler, RRSetSnapshot};
pub use traits::{ApiRequest, Method, RawResponse, Transport};
