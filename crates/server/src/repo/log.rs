use shared_types::{AppError, CreateLogRequest, Log, LogChange, LogQuery, NewLogChange};
use sqlx::{PgConnection, Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"id, created_at, parent_id, parent_type, target_id, target_type,
    action, note, user_id AS "user""#;

/// Write a log entry and its field changes on an open connection, so callers
/// can include it in the transaction that made the change.
pub async fn record(
    conn: &mut PgConnection,
    user: Option<i64>,
    req: &CreateLogRequest,
) -> Result<Log, AppError> {
    let log = sqlx::query_as::<_, Log>(&format!(
        r#"
        INSERT INTO logs (parent_id, parent_type, target_id, target_type, action, note, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.parent_id)
    .bind(&req.parent_type)
    .bind(req.target_id)
    .bind(&req.target_type)
    .bind(&req.action)
    .bind(&req.note)
    .bind(user)
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    for change in &req.changes {
        insert_change(conn, log.id, change).await?;
    }

    Ok(log)
}

async fn insert_change(
    conn: &mut PgConnection,
    log_id: i64,
    change: &NewLogChange,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO log_changes (log_id, field, value) VALUES ($1, $2, $3)")
        .bind(log_id)
        .bind(&change.field)
        .bind(&change.value)
        .execute(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Create a standalone log entry (the `POST /api/logs` path).
pub async fn create(
    pool: &Pool<Postgres>,
    user: i64,
    req: &CreateLogRequest,
) -> Result<Log, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let log = record(&mut tx, Some(user), req).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(log)
}

/// List logs oldest first; every filter in `query` is optional.
pub async fn list(pool: &Pool<Postgres>, query: &LogQuery) -> Result<Vec<Log>, AppError> {
    sqlx::query_as::<_, Log>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM logs
        WHERE ($1::BIGINT IS NULL OR parent_id = $1)
          AND ($2::TEXT IS NULL OR parent_type = $2)
          AND ($3::BIGINT IS NULL OR target_id = $3)
          AND ($4::TEXT IS NULL OR target_type = $4)
        ORDER BY created_at ASC, id ASC
        "#
    ))
    .bind(query.parent_id)
    .bind(query.parent_type.as_deref())
    .bind(query.target_id)
    .bind(query.target_type.as_deref())
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Log>, AppError> {
    sqlx::query_as::<_, Log>(&format!("SELECT {COLUMNS} FROM logs WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_changes(pool: &Pool<Postgres>, log_id: i64) -> Result<Vec<LogChange>, AppError> {
    sqlx::query_as::<_, LogChange>(
        "SELECT id, log_id, field, value FROM log_changes WHERE log_id = $1 ORDER BY id",
    )
    .bind(log_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
