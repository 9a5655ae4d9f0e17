//! Permission wire types (read-only)

use serde::{Deserialize, Serialize};

/// A permission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    #[serde(alias = "descr", default)]
    pub description: Option<String>,
}

/// `data` of `GET permissions/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PermissionEnvelope {
    Wrapped { permission: Permission },
    Bare(Permission),
}

impl PermissionEnvelope {
    pub fn into_permission(self) -> Permission {
        match self {
            PermissionEnvelope::Wrapped { permission } => permission,
            PermissionEnvelope::Bare(permission) => permission,
        }
    }
}

/// `data` of `GET permissions`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PermissionList {
    Bare(Vec<Permission>),
    Wrapped {
        #[serde(default)]
        permissions: Vec<Permission>,
    },
}

impl PermissionList {
    pub fn into_permissions(self) -> Vec<Permission> {
        match self {
            PermissionList::Bare(permissions) => permissions,
            PermissionList::Wrapped { permissions } => permissions,
        }
    }
}
