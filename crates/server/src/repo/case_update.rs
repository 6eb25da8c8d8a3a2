use std::collections::{HashMap, HashSet};

use shared_types::{
    AppError, CaseUpdate, CaseUpdateKind, CaseUpdateRequest, CaseUpdateRow, CreateLogRequest,
    CreateMeetingRequest, ACTION_CREATE, TARGET_CASE_UPDATE, TARGET_LEGAL_CASE,
};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str =
    "id, legal_case_id, kind, title, content, meeting_id, created_by, created_at";

/// Record a note, meeting or file-only update against a legal case.
///
/// A meeting update also creates the `Meeting` (with its own log). Attached
/// files must already belong to the same case.
pub async fn create(
    pool: &Pool<Postgres>,
    user: i64,
    req: CaseUpdateRequest,
) -> Result<CaseUpdate, AppError> {
    let legal_case = req.legal_case;
    let kind = req.into_kind()?;
    let mut files = kind.files();
    let mut seen = HashSet::new();
    files.retain(|id| seen.insert(*id));

    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let (title, content, meeting_id) = match &kind {
        CaseUpdateKind::Note(note) => (note.title.clone(), note.content.clone(), None),
        CaseUpdateKind::Meeting(m) => {
            let meeting = crate::repo::meeting::create_on(
                &mut tx,
                user,
                &CreateMeetingRequest {
                    legal_case,
                    name: String::new(),
                    location: m.location.clone(),
                    meeting_type: m.meeting_type.clone(),
                    meeting_date: m.meeting_date,
                    notes: m.notes.clone(),
                },
            )
            .await?;
            (meeting.meeting_type, meeting.notes, Some(meeting.id))
        }
        CaseUpdateKind::Files(_) => (String::new(), String::new(), None),
    };

    let row = sqlx::query_as::<_, CaseUpdateRow>(&format!(
        r#"
        INSERT INTO case_updates (legal_case_id, kind, title, content, meeting_id, created_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(legal_case)
    .bind(kind.as_str())
    .bind(&title)
    .bind(&content)
    .bind(meeting_id)
    .bind(user)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if !files.is_empty() {
        let attached = sqlx::query(
            r#"
            INSERT INTO case_update_files (case_update_id, legal_case_file_id)
            SELECT $1, f.id FROM legal_case_files f
            WHERE f.id = ANY($2) AND f.legal_case_id = $3
            "#,
        )
        .bind(row.id)
        .bind(&files)
        .bind(legal_case)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        if attached.rows_affected() != files.len() as u64 {
            return Err(AppError::field(
                "files",
                "Every file must belong to this legal case",
            ));
        }
    }

    crate::repo::log::record(
        &mut tx,
        Some(user),
        &CreateLogRequest {
            parent_id: Some(legal_case),
            parent_type: TARGET_LEGAL_CASE.to_string(),
            target_id: Some(row.id),
            target_type: TARGET_CASE_UPDATE.to_string(),
            action: ACTION_CREATE.to_string(),
            note: kind.as_str().to_string(),
            changes: vec![],
        },
    )
    .await?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(CaseUpdate::from_row(row, files))
}

/// List updates newest first, optionally for one legal case.
pub async fn list(
    pool: &Pool<Postgres>,
    legal_case: Option<i64>,
) -> Result<Vec<CaseUpdate>, AppError> {
    let rows = sqlx::query_as::<_, CaseUpdateRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM case_updates
        WHERE $1::BIGINT IS NULL OR legal_case_id = $1
        ORDER BY created_at DESC, id DESC
        "#
    ))
    .bind(legal_case)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let links: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT case_update_id, legal_case_file_id FROM case_update_files
         WHERE case_update_id = ANY($1) ORDER BY legal_case_file_id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let mut files: HashMap<i64, Vec<i64>> = HashMap::new();
    for (update_id, file_id) in links {
        files.entry(update_id).or_default().push(file_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let attached = files.remove(&row.id).unwrap_or_default();
            CaseUpdate::from_row(row, attached)
        })
        .collect())
}
