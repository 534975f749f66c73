//! User profile model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publicly visible fields of a user, served by `POST /users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub status: UserStatus,
}

/// User rights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// May add and edit content
    Admin,
    /// Read-only access
    User,
}
