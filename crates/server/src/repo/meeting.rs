use shared_types::{
    AppError, CreateLogRequest, CreateMeetingRequest, Meeting, NewLogChange,
    UpdateMeetingRequest, ACTION_CREATE, ACTION_UPDATE, TARGET_LEGAL_CASE, TARGET_MEETING,
};
use sqlx::{PgConnection, Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"id, legal_case_id AS legal_case, name, location, meeting_type,
    meeting_date, notes, created_at, updated_at"#;

fn check_fields(req: &CreateMeetingRequest) -> Result<(), AppError> {
    let errors = req.field_errors();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Meeting is incomplete", errors))
    }
}

fn meeting_log(meeting: &Meeting, action: &str, changes: Vec<NewLogChange>) -> CreateLogRequest {
    CreateLogRequest {
        parent_id: Some(meeting.legal_case),
        parent_type: TARGET_LEGAL_CASE.to_string(),
        target_id: Some(meeting.id),
        target_type: TARGET_MEETING.to_string(),
        action: action.to_string(),
        note: meeting.meeting_type.clone(),
        changes,
    }
}

/// Insert a meeting and its "Create" log on an open connection.
pub async fn create_on(
    conn: &mut PgConnection,
    user: i64,
    req: &CreateMeetingRequest,
) -> Result<Meeting, AppError> {
    check_fields(req)?;

    let meeting = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        INSERT INTO meetings (legal_case_id, name, location, meeting_type, meeting_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.legal_case)
    .bind(&req.name)
    .bind(req.location.trim())
    .bind(req.meeting_type.trim())
    .bind(req.meeting_date)
    .bind(&req.notes)
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    crate::repo::log::record(conn, Some(user), &meeting_log(&meeting, ACTION_CREATE, vec![]))
        .await?;

    Ok(meeting)
}

pub async fn create(
    pool: &Pool<Postgres>,
    user: i64,
    req: CreateMeetingRequest,
) -> Result<Meeting, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let meeting = create_on(&mut tx, user, &req).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(meeting)
}

/// List meetings, most recent first, optionally for one legal case.
pub async fn list(pool: &Pool<Postgres>, legal_case: Option<i64>) -> Result<Vec<Meeting>, AppError> {
    sqlx::query_as::<_, Meeting>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meetings
        WHERE $1::BIGINT IS NULL OR legal_case_id = $1
        ORDER BY meeting_date DESC, id DESC
        "#
    ))
    .bind(legal_case)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Meeting>, AppError> {
    sqlx::query_as::<_, Meeting>(&format!("SELECT {COLUMNS} FROM meetings WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    pool: &Pool<Postgres>,
    user: i64,
    id: i64,
    req: UpdateMeetingRequest,
) -> Result<Option<Meeting>, AppError> {
    let errors = req.field_errors();
    if !errors.is_empty() {
        return Err(AppError::validation("Meeting is incomplete", errors));
    }

    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let before = sqlx::query_as::<_, Meeting>(&format!(
        "SELECT {COLUMNS} FROM meetings WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    let Some(before) = before else {
        return Ok(None);
    };

    let after = sqlx::query_as::<_, Meeting>(&format!(
        r#"
        UPDATE meetings SET
            name         = COALESCE($2, name),
            location     = COALESCE($3, location),
            meeting_type = COALESCE($4, meeting_type),
            meeting_date = COALESCE($5, meeting_date),
            notes        = COALESCE($6, notes),
            updated_at   = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.name.as_deref())
    .bind(req.location.as_deref().map(str::trim))
    .bind(req.meeting_type.as_deref().map(str::trim))
    .bind(req.meeting_date)
    .bind(req.notes.as_deref())
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let mut changes = Vec::new();
    if after.name != before.name {
        changes.push(NewLogChange::new("name", after.name.clone()));
    }
    if after.location != before.location {
        changes.push(NewLogChange::new("location", after.location.clone()));
    }
    if after.meeting_type != before.meeting_type {
        changes.push(NewLogChange::new("meeting_type", after.meeting_type.clone()));
    }
    if after.meeting_date != before.meeting_date {
        changes.push(NewLogChange::new("meeting_date", after.meeting_date.to_rfc3339()));
    }
    if after.notes != before.notes {
        changes.push(NewLogChange::new("notes", after.notes.clone()));
    }

    if !changes.is_empty() {
        crate::repo::log::record(
            &mut tx,
            Some(user),
            &meeting_log(&after, ACTION_UPDATE, changes),
        )
        .await?;
    }

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(Some(after))
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
