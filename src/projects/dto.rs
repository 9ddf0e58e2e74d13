use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    projects::repo_types::{ProjectRow, ProjectStatus},
};

fn check_range(value: i32, field: &str) -> Result<(), ApiError> {
    if !(0..=100).contains(&value) {
        return Err(ApiError::Validation(format!(
            "{field} deve estar entre 0 e 100"
        )));
    }
    Ok(())
}

/// Request body for project creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    pub agilidade: i32,
    pub encantamento: i32,
    pub eficiencia: i32,
    pub excelencia: i32,
    pub transparencia: i32,
    pub ambicao: i32,
    pub completion: i32,
    pub responsible_id: Uuid,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Nome é obrigatório".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation("Descrição é obrigatória".into()));
        }
        check_range(self.agilidade, "Agilidade")?;
        check_range(self.encantamento, "Encantamento")?;
        check_range(self.eficiencia, "Eficiência")?;
        check_range(self.excelencia, "Excelência")?;
        check_range(self.transparencia, "Transparência")?;
        check_range(self.ambicao, "Ambição")?;
        check_range(self.completion, "Conclusão")?;
        Ok(())
    }
}

/// Request body for partial project updates. Omitted fields keep their
/// stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub agilidade: Option<i32>,
    pub encantamento: Option<i32>,
    pub eficiencia: Option<i32>,
    pub excelencia: Option<i32>,
    pub transparencia: Option<i32>,
    pub ambicao: Option<i32>,
    pub completion: Option<i32>,
    pub responsible_id: Option<Uuid>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation("Nome é obrigatório".into()));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(ApiError::Validation("Descrição é obrigatória".into()));
            }
        }
        if let Some(v) = self.agilidade {
            check_range(v, "Agilidade")?;
        }
        if let Some(v) = self.encantamento {
            check_range(v, "Encantamento")?;
        }
        if let Some(v) = self.eficiencia {
            check_range(v, "Eficiência")?;
        }
        if let Some(v) = self.excelencia {
            check_range(v, "Excelência")?;
        }
        if let Some(v) = self.transparencia {
            check_range(v, "Transparência")?;
        }
        if let Some(v) = self.ambicao {
            check_range(v, "Ambição")?;
        }
        if let Some(v) = self.completion {
            check_range(v, "Conclusão")?;
        }
        Ok(())
    }

    /// Merge the provided fields onto a stored row. Fields left `None` are
    /// untouched.
    pub fn apply_to(&self, row: &mut ProjectRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(status) = self.status {
            row.status = status.as_str().to_string();
        }
        if let Some(v) = self.agilidade {
            row.agilidade = v;
        }
        if let Some(v) = self.encantamento {
            row.encantamento = v;
        }
        if let Some(v) = self.eficiencia {
            row.eficiencia = v;
        }
        if let Some(v) = self.excelencia {
            row.excelencia = v;
        }
        if let Some(v) = self.transparencia {
            row.transparencia = v;
        }
        if let Some(v) = self.ambicao {
            row.ambicao = v;
        }
        if let Some(v) = self.completion {
            row.completion = v;
        }
        if let Some(id) = self.responsible_id {
            row.responsible_id = id;
        }
    }
}

/// Query filters for the project listing; both optional and combined with
/// logical AND.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    pub status: Option<String>,
    pub responsible_id: Option<Uuid>,
}

/// Aggregate project counts for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::repo_types::sample_row;

    fn valid_create() -> CreateProjectRequest {
        CreateProjectRequest {
            name: "Missão Resgate".into(),
            description: "Resgatar civis em área de risco".into(),
            status: None,
            agilidade: 80,
            encantamento: 70,
            eficiencia: 90,
            excelencia: 85,
            transparencia: 95,
            ambicao: 75,
            completion: 0,
            responsible_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn create_rejects_blank_name_and_description() {
        let mut req = valid_create();
        req.name = " ".into();
        assert!(req.validate().is_err());

        let mut req = valid_create();
        req.description = "".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_rejects_out_of_range_metrics() {
        for bad in [-1, 101, 1000] {
            let mut req = valid_create();
            req.agilidade = bad;
            assert!(req.validate().is_err(), "agilidade={bad} accepted");

            let mut req = valid_create();
            req.encantamento = bad;
            assert!(req.validate().is_err(), "encantamento={bad} accepted");

            let mut req = valid_create();
            req.eficiencia = bad;
            assert!(req.validate().is_err(), "eficiencia={bad} accepted");

            let mut req = valid_create();
            req.excelencia = bad;
            assert!(req.validate().is_err(), "excelencia={bad} accepted");

            let mut req = valid_create();
            req.transparencia = bad;
            assert!(req.validate().is_err(), "transparencia={bad} accepted");

            let mut req = valid_create();
            req.ambicao = bad;
            assert!(req.validate().is_err(), "ambicao={bad} accepted");

            let mut req = valid_create();
            req.completion = bad;
            assert!(req.validate().is_err(), "completion={bad} accepted");
        }
    }

    #[test]
    fn create_accepts_boundary_values() {
        for good in [0, 100] {
            let mut req = valid_create();
            req.agilidade = good;
            req.encantamento = good;
            req.eficiencia = good;
            req.excelencia = good;
            req.transparencia = good;
            req.ambicao = good;
            req.completion = good;
            assert!(req.validate().is_ok(), "boundary {good} rejected");
        }
    }

    #[test]
    fn create_parses_camel_case_wire_format() {
        let req: CreateProjectRequest = serde_json::from_str(
            r#"{
                "name": "Missão Resgate",
                "description": "Resgatar civis",
                "status": "em andamento",
                "agilidade": 80, "encantamento": 70, "eficiencia": 90,
                "excelencia": 85, "transparencia": 95, "ambicao": 75,
                "completion": 10,
                "responsibleId": "123e4567-e89b-12d3-a456-426614174000"
            }"#,
        )
        .unwrap();
        assert_eq!(req.status, Some(ProjectStatus::InProgress));
        assert_eq!(req.agilidade, 80);
    }

    #[test]
    fn update_validates_only_provided_fields() {
        let req = UpdateProjectRequest {
            completion: Some(50),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let req = UpdateProjectRequest {
            completion: Some(101),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateProjectRequest {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_update_leaves_other_fields_untouched() {
        let mut row = sample_row();
        row.status = "em andamento".into();
        let before = row.clone();

        let req = UpdateProjectRequest {
            completion: Some(50),
            ..Default::default()
        };
        req.apply_to(&mut row);

        assert_eq!(row.completion, 50);
        assert_eq!(row.status, "em andamento");
        assert_eq!(row.name, before.name);
        assert_eq!(row.description, before.description);
        assert_eq!(row.agilidade, before.agilidade);
        assert_eq!(row.responsible_id, before.responsible_id);
    }

    #[test]
    fn update_can_replace_any_status_with_any_other() {
        let mut row = sample_row();
        row.status = "concluído".into();

        let req = UpdateProjectRequest {
            status: Some(ProjectStatus::Pending),
            ..Default::default()
        };
        req.apply_to(&mut row);
        assert_eq!(row.status, "pendente");
    }

    #[test]
    fn statistics_serializes_camel_case() {
        let stats = StatisticsResponse {
            total: 1,
            pending: 1,
            in_progress: 0,
            completed: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["pending"], 1);
        assert_eq!(json["inProgress"], 0);
        assert_eq!(json["completed"], 0);
    }
}
