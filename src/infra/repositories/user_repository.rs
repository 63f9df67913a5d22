//! User repository - the persistence gateway for user records.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TryIntoModel,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// User repository trait for dependency injection.
///
/// Lookups report absence as `Ok(None)`, never as an error; only
/// genuine gateway faults surface as `Err`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Persist the given user, assigning an identifier when absent,
    /// and return the stored value
    async fn save(&self, user: User) -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance over a shared connection
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let active = ActiveModel {
            // NotSet lets the database assign the next identifier
            id: user.id.map_or(NotSet, Set),
            username: Set(user.username),
            email: Set(user.email),
        };

        // Inserts when the primary key is unset, updates in place otherwise
        let model = active
            .save(self.db.as_ref())
            .await
            .map_err(AppError::from)?
            .try_into_model()
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }
}
