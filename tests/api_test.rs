//! Integration tests for API endpoints.
//!
//! These tests use a mock user service and a mock database backend to
//! exercise the router without a live database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use tower::ServiceExt;

use user_api::api::{create_router, AppState};
use user_api::domain::User;
use user_api::errors::{AppError, AppResult};
use user_api::infra::Database;
use user_api::services::UserService;

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock user service holding a single stored user with id=1
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        if id == 1 {
            Ok(User {
                id: Some(1),
                username: "control_test".to_string(),
                email: "control@example.com".to_string(),
            })
        } else {
            Err(AppError::NotFound(id))
        }
    }

    async fn create_new_user(&self, candidate: User) -> AppResult<User> {
        if candidate.email == "existing@test.com" {
            Err(AppError::duplicate_email())
        } else {
            Ok(User {
                id: Some(5),
                ..candidate
            })
        }
    }
}

/// Build a router over mock services and a mock database connection
fn test_router() -> Router {
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let state = AppState::new(
        Arc::new(MockUserService),
        Arc::new(Database::from_connection(connection)),
    );
    create_router(state)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

// =============================================================================
// GET /users/{id}
// =============================================================================

#[tokio::test]
async fn test_get_user_returns_200_with_user_body() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "id": 1,
            "username": "control_test",
            "email": "control@example.com"
        })
    );
}

#[tokio::test]
async fn test_get_user_missing_returns_404_empty_body() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_get_user_malformed_id_returns_500_empty_body() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

// =============================================================================
// POST /users
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_201_with_created_body() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"new_control","email":"control_new@test.com"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "id": 5,
            "username": "new_control",
            "email": "control_new@test.com"
        })
    );
}

#[tokio::test]
async fn test_create_user_duplicate_email_returns_400_with_message() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"dup","email":"existing@test.com"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_bytes(response).await,
        b"Email address is already in use."
    );
}

#[tokio::test]
async fn test_create_user_malformed_body_returns_500_empty_body() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

// =============================================================================
// Health & Root Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Welcome to User API");
}

#[tokio::test]
async fn test_health_endpoint_reports_healthy_database() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_endpoint_reports_unhealthy_database() {
    // A disconnected backend fails the ping, degrading the service
    let state = AppState::new(
        Arc::new(MockUserService),
        Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    );
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"]["status"], "unhealthy");
    assert!(body["database"]["error"].is_string());
}

// =============================================================================
// Infrastructure Tests
// =============================================================================

#[tokio::test]
async fn test_database_handles_share_one_connection() {
    let database = Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
    );

    let first = database.get_connection();
    let second = database.clone().get_connection();

    // Cloned handles must point at the same underlying connection
    assert!(Arc::ptr_eq(&first, &second));
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    assert_eq!(AppError::NotFound(1).status(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::duplicate_email().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::internal("oops").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Database(sea_orm::DbErr::Custom("boom".to_string())).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_not_found_error_carries_requested_id() {
    let err = AppError::NotFound(42);
    assert_eq!(err.to_string(), "User not found with ID: 42");
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_user_id_omitted_until_persisted() {
    let candidate = User::new("new_control", "control_new@test.com");
    assert!(!candidate.is_persisted());

    // Serialized candidates must not carry a null id field
    let json = serde_json::to_value(&candidate).unwrap();
    assert!(json.get("id").is_none());

    let persisted = User {
        id: Some(5),
        ..candidate
    };
    assert!(persisted.is_persisted());
    assert_eq!(serde_json::to_value(&persisted).unwrap()["id"], 5);
}
