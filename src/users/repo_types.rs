use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::PublicUser;

/// User role. `hero` is a regular member, `admin` may mutate projects and
/// remove users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hero,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hero => "hero",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "hero" => Some(Role::Hero),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// User record in the database. The role column is TEXT; the explicit
/// `to_public` mapping converts it to [`Role`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub character: String,
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Public view of the user. The password hash never crosses this boundary.
    pub fn to_public(&self) -> anyhow::Result<PublicUser> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| anyhow::anyhow!("unknown role in users.role: {}", self.role))?;
        Ok(PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            character: self.character.clone(),
            role,
        })
    }
}
