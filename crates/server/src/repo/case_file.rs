use shared_types::{
    split_extension, AppError, CreateLogRequest, LegalCaseFile, LegalCaseFileRow, NewLogChange,
    UpdateLegalCaseFileRequest, ACTION_CREATE, ACTION_UPDATE, TARGET_LEGAL_CASE,
    TARGET_LEGAL_CASE_FILE,
};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"id, legal_case_id, upload_key, upload_file_name, upload_file_extension,
    content_type, size_bytes, description, created_at, updated_at"#;

/// A stored object about to be registered against a legal case.
#[derive(Debug, Clone)]
pub struct NewCaseFile<'a> {
    pub legal_case: i64,
    pub upload_key: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub description: &'a str,
}

fn file_log(row: &LegalCaseFileRow, action: &str, changes: Vec<NewLogChange>) -> CreateLogRequest {
    CreateLogRequest {
        parent_id: Some(row.legal_case_id),
        parent_type: TARGET_LEGAL_CASE.to_string(),
        target_id: Some(row.id),
        target_type: TARGET_LEGAL_CASE_FILE.to_string(),
        action: action.to_string(),
        note: row.upload_file_name.clone(),
        changes,
    }
}

/// Record an uploaded file and its "Create" log.
pub async fn create(
    pool: &Pool<Postgres>,
    user: i64,
    file: NewCaseFile<'_>,
) -> Result<LegalCaseFile, AppError> {
    let (_, extension) = split_extension(file.file_name);

    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row = sqlx::query_as::<_, LegalCaseFileRow>(&format!(
        r#"
        INSERT INTO legal_case_files
            (legal_case_id, upload_key, upload_file_name, upload_file_extension,
             content_type, size_bytes, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(file.legal_case)
    .bind(file.upload_key)
    .bind(file.file_name)
    .bind(extension)
    .bind(file.content_type)
    .bind(file.size_bytes)
    .bind(file.description.trim())
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    crate::repo::log::record(&mut tx, Some(user), &file_log(&row, ACTION_CREATE, vec![])).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    Ok(row.into())
}

/// List files oldest first, optionally for one legal case.
pub async fn list(
    pool: &Pool<Postgres>,
    legal_case: Option<i64>,
) -> Result<Vec<LegalCaseFile>, AppError> {
    let rows = sqlx::query_as::<_, LegalCaseFileRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM legal_case_files
        WHERE $1::BIGINT IS NULL OR legal_case_id = $1
        ORDER BY created_at ASC, id ASC
        "#
    ))
    .bind(legal_case)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows.into_iter().map(LegalCaseFile::from).collect())
}

/// The stored row, including the object key.
pub async fn find_row(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<LegalCaseFileRow>, AppError> {
    sqlx::query_as::<_, LegalCaseFileRow>(&format!(
        "SELECT {COLUMNS} FROM legal_case_files WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Change a file's description; logs the new value when it differs.
pub async fn update(
    pool: &Pool<Postgres>,
    user: i64,
    id: i64,
    req: UpdateLegalCaseFileRequest,
) -> Result<Option<LegalCaseFile>, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let before: Option<String> =
        sqlx::query_scalar("SELECT description FROM legal_case_files WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
    let Some(before) = before else {
        return Ok(None);
    };

    let row = sqlx::query_as::<_, LegalCaseFileRow>(&format!(
        r#"
        UPDATE legal_case_files SET
            description = COALESCE($2, description),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.description.as_deref().map(str::trim))
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if row.description != before {
        let changes = vec![NewLogChange::new("description", row.description.clone())];
        crate::repo::log::record(&mut tx, Some(user), &file_log(&row, ACTION_UPDATE, changes))
            .await?;
    }

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(Some(row.into()))
}

/// Delete the row and return it so the caller can remove the stored object.
pub async fn delete(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<LegalCaseFileRow>, AppError> {
    sqlx::query_as::<_, LegalCaseFileRow>(&format!(
        "DELETE FROM legal_case_files WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
