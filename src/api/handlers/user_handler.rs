//! User handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// User creation request.
///
/// A client-supplied `id` is not accepted; identifier assignment belongs
/// to the persistence gateway.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[schema(example = "new_control")]
    pub username: String,
    /// User email address
    #[schema(example = "control_new@test.com")]
    pub email: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<User>> {
    // A path segment that does not parse as an identifier is a boundary
    // fault, not a client-visible validation error
    let Path(id) = id.map_err(|e| AppError::internal(e.body_text()))?;

    let user = state.user_service.get_user_by_id(id).await?;
    Ok(Json(user))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email address already in use"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(payload) = payload.map_err(|e| AppError::internal(e.body_text()))?;

    let candidate = User::new(payload.username, payload.email);
    let created = state.user_service.create_new_user(candidate).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
