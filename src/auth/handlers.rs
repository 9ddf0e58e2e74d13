use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::{is_unique_violation, ApiError},
    state::AppState,
    users::repo_types::User,
};

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email já cadastrado".into()));
    }

    let hash = hash_password(&payload.password)?;

    let user = match User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        &payload.character,
        payload.role,
    )
    .await
    {
        Ok(user) => user,
        // Unique-index backstop for a concurrent registration with the same email.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::Conflict("Email já cadastrado".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let public = user.to_public()?;
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id, &user.email, public.role)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: public,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    // Unknown email and wrong password produce the same message, so the
    // endpoint cannot be used to enumerate accounts.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(user) => user,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::Unauthorized("Credenciais inválidas".into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Unauthorized("Credenciais inválidas".into()));
    }

    let public = user.to_public()?;
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id, &user.email, public.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        user: public,
    }))
}
