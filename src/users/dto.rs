use serde::Serialize;
use uuid::Uuid;

use crate::users::repo_types::Role;

/// Public part of a user returned to clients: auth responses, the heroes
/// listing and the responsible party embedded in every project.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub character: String,
    pub role: Role,
}
