use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::auth::jwt::verify_token;

/// Bearer-token guard for mutating routes
///
/// Verifies `Authorization: Bearer <token>` against the configured secret
/// before the request reaches the resolver. Only the fact of authorization
/// is carried forward; claims are not otherwise used. When `require_auth`
/// is off the guard admits every request (the unguarded variant).
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     _guard: MutationGuard,
/// ) -> Result<StatusCode, ApiError> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct MutationGuard;

#[async_trait]
impl FromRequestParts<AppState> for MutationGuard {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config.require_auth {
            return Ok(MutationGuard);
        }

        // Extract the authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        // Extract bearer token
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        // Verify against the configured secret
        verify_token(token, &state.config.jwt_secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(MutationGuard)
    }
}
