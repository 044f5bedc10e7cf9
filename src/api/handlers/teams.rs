use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::errors::ApiError;
use crate::api::format::{project, FormatQuery, ResponseFormat};
use crate::api::middleware::MutationGuard;
use crate::api::AppState;
use crate::domain::repositories::{DeleteOutcome, StoreError, TeamRepository, UpdateOutcome};
use crate::domain::team::{NewTeam, TeamPatch};
use crate::infrastructure::repositories::MySqlTeamRepository;

/// Request body for creating a team
///
/// Fields stay optional so missing input maps to a 400 with a stable
/// message, validated before anything reaches the store.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: Option<String>,
    pub region: Option<String>,
}

/// Request body for updating a team (field-level partial)
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub team_name: Option<String>,
    pub region: Option<String>,
}

fn team_repository(state: &AppState) -> MySqlTeamRepository {
    MySqlTeamRepository::new(state.pool.clone(), state.config.id_mode)
}

fn team_not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Team with ID {id} not found."))
}

/// Create a new team
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    _guard: MutationGuard,
    Query(query): Query<FormatQuery>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, ApiError> {
    let new_team = NewTeam::new(req.team_name, req.region).map_err(ApiError::bad_request)?;

    let team = team_repository(&state).insert(new_team).await?;

    Ok(project(
        "team",
        &team,
        StatusCode::CREATED,
        ResponseFormat::from_query(&query),
    ))
}

/// List all teams
///
/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let teams = team_repository(&state).list().await?;

    Ok(project(
        "teams",
        &teams,
        StatusCode::OK,
        ResponseFormat::from_query(&query),
    ))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    let team = team_repository(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| team_not_found(id))?;

    Ok(project(
        "team",
        &team,
        StatusCode::OK,
        ResponseFormat::from_query(&query),
    ))
}

/// Update a team (partial, field-level)
///
/// PUT /api/teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    _guard: MutationGuard,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let patch = TeamPatch::new(req.team_name, req.region).map_err(ApiError::bad_request)?;

    match team_repository(&state).update(id, patch).await? {
        UpdateOutcome::Updated => Ok((
            StatusCode::OK,
            Json(json!({ "message": format!("Team {id} updated successfully.") })),
        )),
        UpdateOutcome::NoChange => Ok((
            StatusCode::OK,
            Json(json!({
                "message": format!(
                    "Team {id} found, but no changes were applied (data was identical)."
                )
            })),
        )),
        UpdateOutcome::NotFound => Err(team_not_found(id)),
    }
}

/// Delete a team
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    _guard: MutationGuard,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    match team_repository(&state).delete(id).await {
        Ok(DeleteOutcome::Deleted) => Ok(StatusCode::NO_CONTENT),
        Ok(DeleteOutcome::NotFound) => Err(team_not_found(id)),
        // A delete blocked by a live reference is a conflict with a stable
        // discriminator, not a generic bad request.
        Err(StoreError::ForeignKey(_)) => Err(ApiError::conflict(format!(
            "Cannot delete Team {id}. It is still referenced by other records."
        ))
        .with_code("FK_VIOLATION")),
        Err(other) => Err(other.into()),
    }
}
