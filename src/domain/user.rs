//! User domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity.
///
/// `id` is absent until the user has been persisted; the persistence
/// gateway is the sole authority for identifier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique user identifier (absent for not-yet-persisted users)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub id: Option<i64>,
    /// User display name
    #[schema(example = "control_test")]
    pub username: String,
    /// User email address, unique across all persisted users
    #[schema(example = "control@example.com")]
    pub email: String,
}

impl User {
    /// Create a new, not-yet-persisted user
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Check if the user has been persisted (carries an identifier)
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
