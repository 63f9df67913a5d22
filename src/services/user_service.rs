//! User service - Handles user-related business logic.
//!
//! The only decisions in this system live here: "fetch or fail" and
//! "create with uniqueness enforcement".

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID, failing with `NotFound` when absent
    async fn get_user_by_id(&self, id: i64) -> AppResult<User>;

    /// Create a new user, failing with `DuplicateEmail` when the email
    /// is already registered
    async fn create_new_user(&self, candidate: User) -> AppResult<User>;
}

/// Concrete implementation of UserService over a persistence gateway.
pub struct UserManager {
    repository: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with the given repository
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    async fn create_new_user(&self, candidate: User) -> AppResult<User> {
        // Existence check and save are two separate gateway calls with no
        // transaction tying them together; two concurrent creates with the
        // same email can both pass the check. Known gap, kept as-is.
        if self
            .repository
            .find_by_email(&candidate.email)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_email());
        }

        // The gateway is solely responsible for identifier assignment
        self.repository.save(candidate).await
    }
}
