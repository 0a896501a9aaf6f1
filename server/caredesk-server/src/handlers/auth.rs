use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::models::{NewUser, User};
use crate::server::CareDeskServer;
use crate::validation::RequestValidation;
use crate::validate_required;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl RequestValidation for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.username, "Username is required");
        validate_required!(self.password, "Password is required");
        Ok(())
    }
}

/// Authenticate a staff user
///
/// Stateless by design: the reference system issues no tokens or
/// sessions; the client keeps the returned user record.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = User),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(server): State<CareDeskServer>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    request.validate()?;

    let user = server
        .storage
        .user_by_username(&request.username)
        .filter(|u| u.is_active && u.password == request.password)
        .ok_or_else(|| ApiError::authentication("Invalid username or password"))?;

    Ok(Json(api_success(user)))
}

/// Create a new staff user (admin operation)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Username already taken")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(server): State<CareDeskServer>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    request.validate()?;

    if server.storage.user_by_username(&request.username).is_some() {
        return Err(ApiError::conflict(format!(
            "Username '{}' is already taken",
            request.username
        )));
    }

    let user = server.storage.create_user(request);
    Ok((StatusCode::CREATED, Json(api_success(user))))
}

/// List all staff users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Vec<User>)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(server): State<CareDeskServer>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    Ok(Json(api_success(server.storage.all_users())))
}

/// Get a specific staff user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(server): State<CareDeskServer>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    server
        .storage
        .get_user(id)
        .map(|user| Json(api_success(user)))
        .ok_or_else(|| ApiError::not_found("user"))
}
