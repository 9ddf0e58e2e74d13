use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::projects::{
    dto::CreateProjectRequest,
    repo_types::{ProjectRow, ProjectStatus},
};

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<ProjectRow>> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT p.id, p.name, p.description, p.status,
               p.agilidade, p.encantamento, p.eficiencia, p.excelencia,
               p.transparencia, p.ambicao, p.completion,
               p.responsible_id, p.created_at, p.updated_at,
               u.name AS responsible_name, u.email AS responsible_email,
               u."character" AS responsible_character, u.role AS responsible_role
        FROM projects p
        JOIN users u ON u.id = p.responsible_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Projects matching the optional filters, responsible user joined in,
/// newest first. An omitted filter is unconstrained.
pub async fn list(
    db: &PgPool,
    status: Option<ProjectStatus>,
    responsible_id: Option<Uuid>,
) -> anyhow::Result<Vec<ProjectRow>> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT p.id, p.name, p.description, p.status,
               p.agilidade, p.encantamento, p.eficiencia, p.excelencia,
               p.transparencia, p.ambicao, p.completion,
               p.responsible_id, p.created_at, p.updated_at,
               u.name AS responsible_name, u.email AS responsible_email,
               u."character" AS responsible_character, u.role AS responsible_role
        FROM projects p
        JOIN users u ON u.id = p.responsible_id
        WHERE ($1::text IS NULL OR p.status = $1)
          AND ($2::uuid IS NULL OR p.responsible_id = $2)
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .bind(responsible_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(
    db: &PgPool,
    id: Uuid,
    req: &CreateProjectRequest,
    status: ProjectStatus,
) -> anyhow::Result<ProjectRow> {
    sqlx::query(
        r#"
        INSERT INTO projects (id, name, description, status,
                              agilidade, encantamento, eficiencia, excelencia,
                              transparencia, ambicao, completion, responsible_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(status.as_str())
    .bind(req.agilidade)
    .bind(req.encantamento)
    .bind(req.eficiencia)
    .bind(req.excelencia)
    .bind(req.transparencia)
    .bind(req.ambicao)
    .bind(req.completion)
    .bind(req.responsible_id)
    .execute(db)
    .await?;

    find_by_id(db, id)
        .await?
        .context("project missing after insert")
}

/// Persist a merged row and return it re-read with the (possibly changed)
/// responsible user joined in.
pub async fn update(db: &PgPool, row: &ProjectRow) -> anyhow::Result<ProjectRow> {
    sqlx::query(
        r#"
        UPDATE projects
        SET name = $2, description = $3, status = $4,
            agilidade = $5, encantamento = $6, eficiencia = $7, excelencia = $8,
            transparencia = $9, ambicao = $10, completion = $11,
            responsible_id = $12, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.description)
    .bind(&row.status)
    .bind(row.agilidade)
    .bind(row.encantamento)
    .bind(row.eficiencia)
    .bind(row.excelencia)
    .bind(row.transparencia)
    .bind(row.ambicao)
    .bind(row.completion)
    .bind(row.responsible_id)
    .execute(db)
    .await?;

    find_by_id(db, row.id)
        .await?
        .context("project missing after update")
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_all(db: &PgPool) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
        .fetch_one(db)
        .await?;
    Ok(count)
}

pub async fn count_by_status(db: &PgPool, status: ProjectStatus) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(db)
        .await?;
    Ok(count)
}
