//! User types returned and accepted by the API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric user identifier.
pub type UserID = i64;

/// A user record returned by the `/users` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserID,

    pub name: String,

    pub email: String,

    /// Server-side creation time (local time, no offset).
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Request body for creating or updating a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}
