//! User wire types
//!
//! Passwords are write-only: they appear in requests, never in responses,
//! and never in `Debug` output.

use super::de;
use crate::field::Optional;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub fullname: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(default = "yes", deserialize_with = "de::flexible_bool_default_true")]
    pub active: bool,
    /// Permission template; `None` when the server reports `0` or `null`
    #[serde(default, deserialize_with = "de::optional_id")]
    pub perm_templ: Option<i64>,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub use_ldap: bool,
}

fn yes() -> bool {
    true
}

/// `POST users`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perm_templ: Option<i64>,
    pub use_ldap: bool,
}

/// `PUT users/{id}`; absent keys leave the remote value unchanged
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub username: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub password: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub fullname: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub email: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub description: Optional<String>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub active: Optional<bool>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub perm_templ: Optional<i64>,
    #[serde(skip_serializing_if = "Optional::is_absent")]
    pub use_ldap: Optional<bool>,
}

/// Optional body of `DELETE users/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteUserRequest {
    pub transfer_to_user_id: i64,
}

/// `data` of a successful `POST users`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateUserResponse {
    #[serde(alias = "id")]
    pub user_id: i64,
}

/// `data` of `GET users/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<User>,
}

/// `data` of `GET users`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Bare(Vec<User>),
    Wrapped {
        #[serde(default)]
        users: Vec<User>,
    },
}

impl UserList {
    pub fn into_users(self) -> Vec<User> {
        match self {
            UserList::Bare(users) => users,
            UserList::Wrapped { users } => users,
        }
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("description", &self.description)
            .field("active", &self.active)
            .field("perm_templ", &self.perm_templ)
            .field("use_ldap", &self.use_ldap)
            .finish()
    }
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_present() {
            "<REDACTED>"
        } else {
            "<unchanged>"
        };
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("password", &password)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("description", &self.description)
            .field("active", &self.active)
            .field("perm_templ", &self.perm_templ)
            .field("use_ldap", &self.use_ldap)
            .finish()
    }
}
