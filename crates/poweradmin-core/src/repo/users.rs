//! User repository

use super::Echo;
use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::user::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, UpdateUserRequest, User, UserEnvelope,
    UserList,
};

/// User operations
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: ApiClient,
}

impl UserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET users/{id}`
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let envelope: UserEnvelope = self.client.get_required(ctx, &format!("users/{}", id)).await?;
        envelope
            .user
            .ok_or_else(|| Error::invalid_response(format!("user {} missing from response", id)))
    }

    /// `GET users`
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>> {
        let list: Option<UserList> = self.client.get(ctx, "users").await?;
        Ok(list.map(UserList::into_users).unwrap_or_default())
    }

    /// `POST users`; the API answers with the new id only
    pub async fn create(&self, ctx: &RequestContext, request: &CreateUserRequest) -> Result<Echo<User>> {
        let created: Option<CreateUserResponse> = self.client.post(ctx, "users", request).await?;
        Ok(match created {
            Some(created) => Echo::Id(created.user_id),
            None => Echo::Nothing,
        })
    }

    /// `PUT users/{id}`
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        request: &UpdateUserRequest,
    ) -> Result<Option<User>> {
        let envelope: Option<UserEnvelope> =
            self.client.put(ctx, &format!("users/{}", id), request).await?;
        Ok(envelope.and_then(|e| e.user))
    }

    /// `DELETE users/{id}`, optionally handing owned zones to another user
    pub async fn delete(&self, ctx: &RequestContext, id: i64, transfer_to: Option<i64>) -> Result<()> {
        let body = transfer_to
            .map(|transfer_to_user_id| serde_json::to_value(DeleteUserRequest { transfer_to_user_id }))
            .transpose()?;
        self.client.delete(ctx, &format!("users/{}", id), body).await
    }

    /// First user whose username matches exactly
    ///
    /// A miss is reported as `NotFound` after filtering the full list
    /// locally; it is not a server 404.
    pub async fn find_by_username(&self, ctx: &RequestContext, username: &str) -> Result<User> {
        self.list(ctx)
            .await?
            .into_iter()
            .find(|user| user.username == username)
            .ok_or_else(|| Error::not_found(format!("no user named '{}' in the user list", username)))
    }
}
