use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::{AdminUser, AuthUser},
    error::ApiError,
    projects::{
        dto::{CreateProjectRequest, ListProjectsQuery, StatisticsResponse, UpdateProjectRequest},
        repo,
        repo_types::{Project, ProjectStatus},
    },
    state::AppState,
    users::repo_types::User,
};

#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    payload.validate()?;

    if User::find_by_id(&state.db, payload.responsible_id)
        .await?
        .is_none()
    {
        warn!(responsible_id = %payload.responsible_id, "responsible user does not exist");
        return Err(ApiError::Validation("Responsável não encontrado".into()));
    }

    let status = payload.status.unwrap_or(ProjectStatus::Pending);
    let row = repo::insert(&state.db, Uuid::new_v4(), &payload, status).await?;

    info!(project_id = %row.id, created_by = %claims.sub, "project created");
    Ok((StatusCode::CREATED, Json(Project::try_from(row)?)))
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(s) => Some(
            ProjectStatus::parse(s).ok_or_else(|| ApiError::Validation("Status inválido".into()))?,
        ),
        None => None,
    };

    let rows = repo::list(&state.db, status, query.responsible_id).await?;
    let projects = rows
        .into_iter()
        .map(Project::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(projects))
}

/// Four independent counts; under concurrent writes they may disagree by a
/// small margin.
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let total = repo::count_all(&state.db).await?;
    let pending = repo::count_by_status(&state.db, ProjectStatus::Pending).await?;
    let in_progress = repo::count_by_status(&state.db, ProjectStatus::InProgress).await?;
    let completed = repo::count_by_status(&state.db, ProjectStatus::Completed).await?;

    Ok(Json(StatisticsResponse {
        total,
        pending,
        in_progress,
        completed,
    }))
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, ApiError> {
    let row = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Projeto não encontrado".into()))?;
    Ok(Json(Project::try_from(row)?))
}

#[instrument(skip(state, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    payload.validate()?;

    let mut row = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Projeto não encontrado".into()))?;

    if let Some(responsible_id) = payload.responsible_id {
        if User::find_by_id(&state.db, responsible_id).await?.is_none() {
            warn!(responsible_id = %responsible_id, "responsible user does not exist");
            return Err(ApiError::Validation("Responsável não encontrado".into()));
        }
    }

    payload.apply_to(&mut row);
    let row = repo::update(&state.db, &row).await?;

    info!(project_id = %id, updated_by = %claims.sub, "project updated");
    Ok(Json(Project::try_from(row)?))
}

#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Projeto não encontrado".into()));
    }
    info!(project_id = %id, deleted_by = %claims.sub, "project removed");
    Ok(Json(json!({ "message": "Projeto removido com sucesso" })))
}
