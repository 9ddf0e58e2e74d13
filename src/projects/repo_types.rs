use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::{dto::PublicUser, repo_types::Role};

/// Project lifecycle status. Wire values are the Portuguese labels shown in
/// the dashboard. Any status may replace any other; there is no transition
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em andamento")]
    InProgress,
    #[serde(rename = "concluído")]
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pendente",
            ProjectStatus::InProgress => "em andamento",
            ProjectStatus::Completed => "concluído",
        }
    }

    pub fn parse(s: &str) -> Option<ProjectStatus> {
        match s {
            "pendente" => Some(ProjectStatus::Pending),
            "em andamento" => Some(ProjectStatus::InProgress),
            "concluído" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

/// Project row as read from the database, always joined with the
/// responsible user's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub agilidade: i32,
    pub encantamento: i32,
    pub eficiencia: i32,
    pub excelencia: i32,
    pub transparencia: i32,
    pub ambicao: i32,
    pub completion: i32,
    pub responsible_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub responsible_name: String,
    pub responsible_email: String,
    pub responsible_character: String,
    pub responsible_role: String,
}

/// Project as returned to clients, responsible user embedded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub agilidade: i32,
    pub encantamento: i32,
    pub eficiencia: i32,
    pub excelencia: i32,
    pub transparencia: i32,
    pub ambicao: i32,
    pub completion: i32,
    pub responsible_id: Uuid,
    pub responsible: PublicUser,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TryFrom<ProjectRow> for Project {
    type Error = anyhow::Error;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::parse(&row.status)
            .ok_or_else(|| anyhow::anyhow!("unknown status in projects.status: {}", row.status))?;
        let role = Role::parse(&row.responsible_role).ok_or_else(|| {
            anyhow::anyhow!("unknown role in users.role: {}", row.responsible_role)
        })?;
        Ok(Project {
            id: row.id,
            name: row.name,
            description: row.description,
            status,
            agilidade: row.agilidade,
            encantamento: row.encantamento,
            eficiencia: row.eficiencia,
            excelencia: row.excelencia,
            transparencia: row.transparencia,
            ambicao: row.ambicao,
            completion: row.completion,
            responsible_id: row.responsible_id,
            responsible: PublicUser {
                id: row.responsible_id,
                name: row.responsible_name,
                email: row.responsible_email,
                character: row.responsible_character,
                role,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_row() -> ProjectRow {
    ProjectRow {
        id: Uuid::new_v4(),
        name: "Missão Resgate".into(),
        description: "Resgatar civis em área de risco".into(),
        status: "em andamento".into(),
        agilidade: 80,
        encantamento: 70,
        eficiencia: 90,
        excelencia: 85,
        transparencia: 95,
        ambicao: 75,
        completion: 40,
        responsible_id: Uuid::new_v4(),
        created_at: OffsetDateTime::now_utc(),
        updated_at: OffsetDateTime::now_utc(),
        responsible_name: "Bruce Wayne".into(),
        responsible_email: "bruce@wayne.com".into(),
        responsible_character: "Batman".into(),
        responsible_role: "admin".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Pending).unwrap(),
            "\"pendente\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"em andamento\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Completed).unwrap(),
            "\"concluído\""
        );
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            ProjectStatus::Pending,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
        ] {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("done"), None);
        assert_eq!(ProjectStatus::parse(""), None);
    }

    #[test]
    fn row_maps_to_project_with_responsible() {
        let row = sample_row();
        let id = row.id;
        let responsible_id = row.responsible_id;

        let project = Project::try_from(row).expect("valid row");
        assert_eq!(project.id, id);
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.agilidade, 80);
        assert_eq!(project.encantamento, 70);
        assert_eq!(project.eficiencia, 90);
        assert_eq!(project.excelencia, 85);
        assert_eq!(project.transparencia, 95);
        assert_eq!(project.ambicao, 75);
        assert_eq!(project.completion, 40);
        assert_eq!(project.responsible.id, responsible_id);
        assert_eq!(project.responsible.role, Role::Admin);
    }

    #[test]
    fn row_with_unknown_status_fails_mapping() {
        let mut row = sample_row();
        row.status = "arquivado".into();
        assert!(Project::try_from(row).is_err());
    }

    #[test]
    fn project_json_uses_original_field_names() {
        let project = Project::try_from(sample_row()).unwrap();
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("agilidade").is_some());
        assert!(json.get("responsibleId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "em andamento");
        assert!(json["responsible"].get("password").is_none());
        assert!(json["responsible"].get("passwordHash").is_none());
    }
}
