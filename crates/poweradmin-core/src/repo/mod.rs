//! Entity repositories
//!
//! One-to-one mappings from entity operations to `(method, path, body)`
//! triples. Repositories perform exactly one remote round trip per call
//! (name lookups list then filter) and hold no state besides the client.

pub mod permissions;
pub mod records;
pub mod rrsets;
pub mod users;
pub mod zones;

pub use permissions::PermissionRepository;
pub use records::RecordRepository;
pub use rrsets::RRSetRepository;
pub use users::UserRepository;
pub use zones::ZoneRepository;

use crate::api::ApiClient;

/// What a write call handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Echo<T> {
    /// The full entity
    Entity(T),
    /// Only the identity of the entity
    Id(i64),
    /// Nothing usable
    Nothing,
}

impl<T> Echo<T> {
    /// The echoed entity, if any
    pub fn entity(self) -> Option<T> {
        match self {
            Echo::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// All repositories over one shared client
#[derive(Debug, Clone)]
pub struct Repositories {
    pub zones: ZoneRepository,
    pub records: RecordRepository,
    pub rrsets: RRSetRepository,
    pub users: UserRepository,
    pub permissions: PermissionRepository,
}

impl Repositories {
    pub fn new(client: ApiClient) -> Self {
        Self {
            zones: ZoneRepository::new(client.clone()),
            records: RecordRepository::new(client.clone()),
            rrsets: RRSetRepository::new(client.clone()),
            users: UserRepository::new(client.clone()),
            permissions: PermissionRepository::new(client),
        }
    }
}

/// Append `?type=T` when a type filter is given
pub(crate) fn with_type_filter(path: String, rtype: Option<&str>) -> String {
    match rtype.filter(|t| !t.is_empty()) {
        Some(rtype) => format!("{}?type={}", path, rtype),
        None => path,
    }
}
