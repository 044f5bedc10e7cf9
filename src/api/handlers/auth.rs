use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::auth::jwt::create_token;
use crate::auth::password::verify_password;

/// Request body for login
///
/// Fields stay optional so an absent field maps to a 400 with a stable
/// message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Login with the administrative credential
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = req
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(missing_credentials)?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(missing_credentials)?;

    if username != state.config.admin_username {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let valid = verify_password(&password, &state.config.admin_password_hash).map_err(|e| {
        ApiError::internal_server_error(format!("Password verification failed: {}", e))
    })?;

    if !valid {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_token(
        &username,
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )
    .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.token_ttl_minutes * 60,
    }))
}

fn missing_credentials() -> ApiError {
    ApiError::bad_request("Missing credentials: username and password are required.")
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
