use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    users::{dto::PublicUser, repo_types::Role},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for hero registration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub character: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Nome é obrigatório".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("Email inválido".into()));
        }
        if self.character.trim().is_empty() {
            return Err(ApiError::Validation("Personagem é obrigatório".into()));
        }
        if self.password.chars().count() < 6 {
            return Err(ApiError::Validation(
                "Senha deve ter no mínimo 6 caracteres".into(),
            ));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("Email inválido".into()));
        }
        if self.password.is_empty() {
            return Err(ApiError::Validation("Senha é obrigatória".into()));
        }
        Ok(())
    }
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: PublicUser,
}
