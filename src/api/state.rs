//! Application state - Dependency injection container.
//!
//! The handler layer holds a service reference, the service holds a
//! repository reference; both are wired here at startup.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection, wiring the
    /// repository and service layers.
    pub fn from_database(database: Arc<Database>) -> Self {
        let repository = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(repository));

        Self {
            user_service,
            database,
        }
    }

    /// Create application state with a manually injected service.
    ///
    /// Used by tests to substitute mock services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
