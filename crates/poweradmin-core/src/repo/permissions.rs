//! Permission repository (read-only)

use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::permission::{Permission, PermissionEnvelope, PermissionList};

/// Permission lookups
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    client: ApiClient,
}

impl PermissionRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET permissions/{id}`
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> Result<Permission> {
        let envelope: PermissionEnvelope =
            self.client.get_required(ctx, &format!("permissions/{}", id)).await?;
        Ok(envelope.into_permission())
    }

    /// `GET permissions`
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Permission>> {
        let list: Option<PermissionList> = self.client.get(ctx, "permissions").await?;
        Ok(list.map(PermissionList::into_permissions).unwrap_or_default())
    }

    /// First permission whose name matches exactly
    ///
    /// A miss is reported as `NotFound` after filtering the full list
    /// locally; it is not a server 404.
    pub async fn find_by_name(&self, ctx: &RequestContext, name: &str) -> Result<Permission> {
        self.list(ctx)
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::not_found(format!("no permission named '{}' in the permission list", name)))
    }
}
