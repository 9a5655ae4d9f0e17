//! User lifecycle
//!
//! The password is write-only. It is carried in the applied state from the
//! declaration that last set it, and an update only sends it when the new
//! declaration differs from that prior value.

use super::{
    Lifecycle, ReadOutcome, ResourceKind, absent_if_not_found, deleted_if_not_found, read_back,
};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::field::{Field, Optional};
use crate::import;
use crate::model::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::repo::{Echo, UserRepository};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Declared user
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserSpec {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub email: String,
    pub description: Field<String>,
    pub active: Field<bool>,
    pub perm_templ: Field<i64>,
    pub use_ldap: Field<bool>,
    /// Owner of this user's zones once the user is deleted
    pub transfer_zones_to: Option<i64>,
}

impl UserSpec {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::validation("username cannot be empty"));
        }
        if self.password.is_empty() && !self.use_ldap.value().copied().unwrap_or(false) {
            return Err(Error::validation(format!(
                "user {}: password is required unless LDAP authentication is used",
                self.username
            )));
        }
        Ok(())
    }

    /// Delta payload against the prior applied state
    pub fn to_update(&self, prior: &UserState) -> UpdateUserRequest {
        UpdateUserRequest {
            username: Optional::Present(self.username.clone()),
            password: if self.password != prior.password {
                Optional::Present(self.password.clone())
            } else {
                Optional::Absent
            },
            fullname: Optional::Present(self.fullname.clone()),
            email: Optional::Present(self.email.clone()),
            description: self.description.encode(),
            active: self.active.encode_or(true),
            perm_templ: self.perm_templ.encode(),
            use_ldap: self.use_ldap.encode(),
        }
    }
}

/// Applied user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub id: i64,
    pub username: String,
    /// Never returned by the server; kept from the prior declaration
    #[serde(default)]
    pub password: String,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub description: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub perm_templ: Option<i64>,
    pub use_ldap: bool,
    #[serde(default)]
    pub transfer_zones_to: Option<i64>,
}

impl UserState {
    fn project(user: User, password: String, transfer_zones_to: Option<i64>) -> Self {
        Self {
            id: user.user_id,
            username: user.username,
            password,
            fullname: user.fullname,
            email: user.email,
            description: if user.description.is_empty() {
                None
            } else {
                Some(user.description)
            },
            active: user.active,
            perm_templ: user.perm_templ,
            use_ldap: user.use_ldap,
            transfer_zones_to,
        }
    }
}

impl fmt::Debug for UserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSpec")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("description", &self.description)
            .field("active", &self.active)
            .field("perm_templ", &self.perm_templ)
            .field("use_ldap", &self.use_ldap)
            .field("transfer_zones_to", &self.transfer_zones_to)
            .finish()
    }
}

impl fmt::Debug for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserState")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("description", &self.description)
            .field("active", &self.active)
            .field("perm_templ", &self.perm_templ)
            .field("use_ldap", &self.use_ldap)
            .field("transfer_zones_to", &self.transfer_zones_to)
            .finish()
    }
}

/// User lifecycle over the user repository
#[derive(Debug, Clone)]
pub struct UserLifecycle {
    users: UserRepository,
}

impl UserLifecycle {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Lifecycle for UserLifecycle {
    type Desired = UserSpec;
    type State = UserState;
    type Identity = i64;

    const KIND: ResourceKind = ResourceKind::User;

    async fn create(&self, ctx: &RequestContext, desired: &UserSpec) -> Result<UserState> {
        desired.validate()?;

        let request = CreateUserRequest {
            username: desired.username.clone(),
            password: desired.password.clone(),
            fullname: desired.fullname.clone(),
            email: desired.email.clone(),
            description: desired.description.value().cloned(),
            active: desired.active.or_default_value(true),
            perm_templ: desired.perm_templ.value().copied(),
            use_ldap: desired.use_ldap.or_default_value(false),
        };

        let echo = self
            .users
            .create(ctx, &request)
            .await
            .map_err(|e| e.context(Self::KIND, &desired.username))?;

        let user = match echo {
            Echo::Entity(user) => user,
            Echo::Id(id) => read_back(Self::KIND, &desired.username, self.users.get(ctx, id)).await?,
            Echo::Nothing => {
                read_back(
                    Self::KIND,
                    &desired.username,
                    self.users.find_by_username(ctx, &desired.username),
                )
                .await?
            }
        };

        trace!(username = %user.username, id = user.user_id, "User created");
        Ok(UserState::project(user, desired.password.clone(), desired.transfer_zones_to))
    }

    async fn read(&self, ctx: &RequestContext, current: &UserState) -> Result<ReadOutcome<UserState>> {
        let identity = current.id.to_string();
        let result = self.users.get(ctx, current.id).await;
        Ok(absent_if_not_found(Self::KIND, &identity, result)?.map(|user| {
            UserState::project(user, current.password.clone(), current.transfer_zones_to)
        }))
    }

    async fn update(&self, ctx: &RequestContext, current: &UserState, desired: &UserSpec) -> Result<UserState> {
        let identity = current.id.to_string();
        desired.validate()?;

        let request = desired.to_update(current);
        if request.password.is_present() {
            trace!(user = %identity, "Password change requested");
        }

        let echoed = self
            .users
            .update(ctx, current.id, &request)
            .await
            .map_err(|e| e.context(Self::KIND, &identity))?;

        let user = match echoed {
            Some(user) => user,
            None => read_back(Self::KIND, &identity, self.users.get(ctx, current.id)).await?,
        };

        trace!(user = %identity, "User updated");
        Ok(UserState::project(user, desired.password.clone(), desired.transfer_zones_to))
    }

    async fn delete(&self, ctx: &RequestContext, current: &UserState) -> Result<()> {
        let identity = current.id.to_string();
        let result = self
            .users
            .delete(ctx, current.id, current.transfer_zones_to)
            .await;
        deleted_if_not_found(Self::KIND, &identity, result)
    }

    async fn import(&self, _ctx: &RequestContext, external_id: &str) -> Result<i64> {
        import::parse_user(external_id)
    }

    fn from_identity(id: i64) -> UserState {
        UserState {
            id,
            username: String::new(),
            password: String::new(),
            fullname: String::new(),
            email: String::new(),
            description: None,
            active: true,
            perm_templ: None,
            use_ldap: false,
            transfer_zones_to: None,
        }
    }
}
