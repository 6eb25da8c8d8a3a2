use shared_types::{AppError, CaseType, CreateCaseTypeRequest, UpdateCaseTypeRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<CaseType>, AppError> {
    sqlx::query_as::<_, CaseType>(
        "SELECT id, title, description, created_at, updated_at FROM case_types ORDER BY title ASC",
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<CaseType>, AppError> {
    sqlx::query_as::<_, CaseType>(
        "SELECT id, title, description, created_at, updated_at FROM case_types WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn create(
    pool: &Pool<Postgres>,
    req: CreateCaseTypeRequest,
) -> Result<CaseType, AppError> {
    sqlx::query_as::<_, CaseType>(
        r#"
        INSERT INTO case_types (title, description)
        VALUES ($1, $2)
        RETURNING id, title, description, created_at, updated_at
        "#,
    )
    .bind(req.title.trim())
    .bind(&req.description)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: UpdateCaseTypeRequest,
) -> Result<Option<CaseType>, AppError> {
    sqlx::query_as::<_, CaseType>(
        r#"
        UPDATE case_types SET
            title       = COALESCE($2, title),
            description = COALESCE($3, description),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING id, title, description, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.title.as_deref())
    .bind(req.description.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM case_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
