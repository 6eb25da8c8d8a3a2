use std::collections::HashMap;

use chrono::Utc;
use shared_types::{
    generate_case_number, AppError, CreateLegalCaseRequest, CreateLogRequest, LegalCase,
    LegalCaseRelations, LegalCaseRow, NewLogChange, UpdateLegalCaseRequest, ACTION_CREATE,
    ACTION_UPDATE, TARGET_LEGAL_CASE,
};
use sqlx::{PgConnection, Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, case_number, state, client_id, summary, created_at, updated_at";

/// Relation ids for each case in `ids`. Offices keep their given order.
async fn load_relations(
    conn: &mut PgConnection,
    ids: &[i64],
) -> Result<HashMap<i64, LegalCaseRelations>, AppError> {
    let mut map: HashMap<i64, LegalCaseRelations> = HashMap::new();

    let users: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT legal_case_id, user_id FROM legal_case_users
         WHERE legal_case_id = ANY($1) ORDER BY user_id",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    for (case_id, user_id) in users {
        map.entry(case_id).or_default().users.push(user_id);
    }

    let types: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT legal_case_id, case_type_id FROM legal_case_case_types
         WHERE legal_case_id = ANY($1) ORDER BY case_type_id",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    for (case_id, type_id) in types {
        map.entry(case_id).or_default().case_types.push(type_id);
    }

    let offices: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT legal_case_id, case_office_id FROM legal_case_case_offices
         WHERE legal_case_id = ANY($1) ORDER BY position, case_office_id",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    for (case_id, office_id) in offices {
        map.entry(case_id).or_default().case_offices.push(office_id);
    }

    Ok(map)
}

async fn hydrate(
    conn: &mut PgConnection,
    rows: Vec<LegalCaseRow>,
) -> Result<Vec<LegalCase>, AppError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut relations = load_relations(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let rel = relations.remove(&row.id).unwrap_or_default();
            LegalCase::from_row(row, rel)
        })
        .collect())
}

async fn replace_users(conn: &mut PgConnection, id: i64, users: &[i64]) -> Result<(), AppError> {
    sqlx::query("DELETE FROM legal_case_users WHERE legal_case_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    sqlx::query(
        "INSERT INTO legal_case_users (legal_case_id, user_id)
         SELECT $1, u FROM UNNEST($2::BIGINT[]) AS u ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(users)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

async fn replace_case_types(
    conn: &mut PgConnection,
    id: i64,
    types: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM legal_case_case_types WHERE legal_case_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    sqlx::query(
        "INSERT INTO legal_case_case_types (legal_case_id, case_type_id)
         SELECT $1, t FROM UNNEST($2::BIGINT[]) AS t ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(types)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

async fn replace_case_offices(
    conn: &mut PgConnection,
    id: i64,
    offices: &[i64],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM legal_case_case_offices WHERE legal_case_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    sqlx::query(
        "INSERT INTO legal_case_case_offices (legal_case_id, case_office_id, position)
         SELECT $1, o.id, o.pos FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS o(id, pos)
         ON CONFLICT DO NOTHING",
    )
    .bind(id)
    .bind(offices)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// List legal cases, newest first, optionally for one client.
pub async fn list(pool: &Pool<Postgres>, client: Option<i64>) -> Result<Vec<LegalCase>, AppError> {
    let mut conn = pool.acquire().await.map_err(SqlxErrorExt::into_app_error)?;
    let rows = sqlx::query_as::<_, LegalCaseRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM legal_cases
        WHERE $1::BIGINT IS NULL OR client_id = $1
        ORDER BY created_at DESC, id DESC
        "#
    ))
    .bind(client)
    .fetch_all(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    hydrate(&mut conn, rows).await
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<LegalCase>, AppError> {
    let mut conn = pool.acquire().await.map_err(SqlxErrorExt::into_app_error)?;
    find_on(&mut conn, id).await
}

async fn find_on(conn: &mut PgConnection, id: i64) -> Result<Option<LegalCase>, AppError> {
    let row = sqlx::query_as::<_, LegalCaseRow>(&format!(
        "SELECT {COLUMNS} FROM legal_cases WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    match row {
        Some(row) => Ok(hydrate(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Open a new legal case. The first office issues the case number, which
/// embeds the next case id; a concurrent create that lands on the same
/// number fails with a conflict.
pub async fn create(
    pool: &Pool<Postgres>,
    user: i64,
    req: CreateLegalCaseRequest,
) -> Result<LegalCase, AppError> {
    let first_office = *req
        .case_offices
        .first()
        .ok_or_else(|| AppError::field("case_offices", "At least one case office is required"))?;

    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let office_code: String =
        sqlx::query_scalar("SELECT case_office_code FROM case_offices WHERE id = $1")
            .bind(first_office)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?
            .ok_or_else(|| AppError::field("case_offices", "Case office does not exist"))?;

    let next_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) + 1 FROM legal_cases")
        .fetch_one(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let case_number = generate_case_number(&office_code, Utc::now().date_naive(), next_id);

    let row = sqlx::query_as::<_, LegalCaseRow>(&format!(
        r#"
        INSERT INTO legal_cases (case_number, state, client_id, summary)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&case_number)
    .bind(req.state.as_str())
    .bind(req.client)
    .bind(&req.summary)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    replace_users(&mut tx, row.id, &req.users).await?;
    replace_case_types(&mut tx, row.id, &req.case_types).await?;
    replace_case_offices(&mut tx, row.id, &req.case_offices).await?;

    crate::repo::log::record(
        &mut tx,
        Some(user),
        &CreateLogRequest {
            parent_id: Some(row.id),
            parent_type: TARGET_LEGAL_CASE.to_string(),
            target_id: Some(row.id),
            target_type: TARGET_LEGAL_CASE.to_string(),
            action: ACTION_CREATE.to_string(),
            note: case_number,
            changes: vec![NewLogChange::new("state", req.state.as_str())],
        },
    )
    .await?;

    let created = find_on(&mut tx, row.id)
        .await?
        .ok_or_else(|| AppError::internal("Created legal case vanished"))?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(case_id = created.id, case_number = %created.case_number, "Legal case opened");
    Ok(created)
}

/// Apply a partial update and log one change per field that actually moved.
pub async fn update(
    pool: &Pool<Postgres>,
    user: i64,
    id: i64,
    req: UpdateLegalCaseRequest,
) -> Result<Option<LegalCase>, AppError> {
    if req.case_offices.as_ref().is_some_and(|o| o.is_empty()) {
        return Err(AppError::field(
            "case_offices",
            "At least one case office is required",
        ));
    }

    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM legal_cases WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    if locked.is_none() {
        return Ok(None);
    }
    let Some(before) = find_on(&mut tx, id).await? else {
        return Ok(None);
    };

    let mut changes = Vec::new();
    if let Some(state) = req.state.filter(|s| *s != before.state) {
        changes.push(NewLogChange::new("state", state.as_str()));
    }
    if let Some(summary) = req.summary.as_ref().filter(|s| **s != before.summary) {
        changes.push(NewLogChange::new("summary", summary.clone()));
    }

    sqlx::query(
        r#"
        UPDATE legal_cases SET
            state      = COALESCE($2, state),
            summary    = COALESCE($3, summary),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(req.state.map(|s| s.as_str()))
    .bind(req.summary.as_deref())
    .execute(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if let Some(users) = req.users.as_ref().filter(|u| **u != before.users) {
        replace_users(&mut tx, id, users).await?;
        changes.push(NewLogChange::new("users", join_ids(users)));
    }
    if let Some(types) = req.case_types.as_ref().filter(|t| **t != before.case_types) {
        replace_case_types(&mut tx, id, types).await?;
        changes.push(NewLogChange::new("case_types", join_ids(types)));
    }
    if let Some(offices) = req.case_offices.as_ref().filter(|o| **o != before.case_offices) {
        replace_case_offices(&mut tx, id, offices).await?;
        changes.push(NewLogChange::new("case_offices", join_ids(offices)));
    }

    if !changes.is_empty() {
        crate::repo::log::record(
            &mut tx,
            Some(user),
            &CreateLogRequest {
                parent_id: Some(id),
                parent_type: TARGET_LEGAL_CASE.to_string(),
                target_id: Some(id),
                target_type: TARGET_LEGAL_CASE.to_string(),
                action: ACTION_UPDATE.to_string(),
                note: before.case_number.clone(),
                changes,
            },
        )
        .await?;
    }

    let updated = find_on(&mut tx, id).await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(updated)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM legal_cases WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
