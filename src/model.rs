//! The user resource as it travels over HTTP and through storage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user. `id` is assigned by the database and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

/// Request body for create and update. Missing fields default to empty strings;
/// a client-supplied `id` is accepted and ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        UserPayload {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn into_user(self, id: u32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
