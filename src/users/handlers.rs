use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::{AdminUser, AuthUser},
    error::{is_foreign_key_violation, ApiError},
    state::AppState,
    users::{dto::PublicUser, repo_types::User},
};

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    let heroes = users
        .iter()
        .map(User::to_public)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(heroes))
}

/// Subject of the presented token. Rejects tokens whose user was deleted
/// after issuance.
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "token subject no longer exists");
            ApiError::Unauthorized("Usuário não encontrado".into())
        })?;
    Ok(Json(user.to_public()?))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Herói não encontrado".into()))?;
    Ok(Json(user.to_public()?))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    match User::delete(&state.db, id).await {
        Ok(true) => {
            info!(user_id = %id, deleted_by = %claims.sub, "user removed");
            Ok(Json(json!({ "message": "Herói removido com sucesso" })))
        }
        Ok(false) => Err(ApiError::NotFound("Herói não encontrado".into())),
        Err(e) if is_foreign_key_violation(&e) => {
            warn!(user_id = %id, "user still referenced by projects");
            Err(ApiError::Conflict("Herói possui projetos vinculados".into()))
        }
        Err(e) => Err(e.into()),
    }
}
