use shared_types::{AppError, CaseOffice, CreateCaseOfficeRequest, UpdateCaseOfficeRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, name, description, case_office_code, created_at, updated_at";

/// List all case offices, alphabetically.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<CaseOffice>, AppError> {
    sqlx::query_as::<_, CaseOffice>(&format!(
        "SELECT {COLUMNS} FROM case_offices ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<CaseOffice>, AppError> {
    sqlx::query_as::<_, CaseOffice>(&format!(
        "SELECT {COLUMNS} FROM case_offices WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn create(
    pool: &Pool<Postgres>,
    req: CreateCaseOfficeRequest,
) -> Result<CaseOffice, AppError> {
    sqlx::query_as::<_, CaseOffice>(&format!(
        r#"
        INSERT INTO case_offices (name, description, case_office_code)
        VALUES ($1, $2, $3)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.case_office_code.trim())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Partially update an office. Absent fields keep their values.
pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: UpdateCaseOfficeRequest,
) -> Result<Option<CaseOffice>, AppError> {
    sqlx::query_as::<_, CaseOffice>(&format!(
        r#"
        UPDATE case_offices SET
            name             = COALESCE($2, name),
            description      = COALESCE($3, description),
            case_office_code = COALESCE($4, case_office_code),
            updated_at       = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.name.as_deref())
    .bind(req.description.as_deref())
    .bind(req.case_office_code.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Delete an office. Returns true if a row was actually deleted.
pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM case_offices WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
