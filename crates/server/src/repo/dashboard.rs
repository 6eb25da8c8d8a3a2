//! Flat rows behind the reporting dashboard. Aggregation happens in
//! `shared_types::dashboard`; these queries only load what it needs.

use shared_types::dashboard::{
    daily_summary, monthly_summary, range_summary, CaseActivity, CaseRecord, CloseEvent,
    OfficerActivity, SummaryRange,
};
use shared_types::{AppError, DataByRange, DataDailyPerMonth, DataMonthly};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

async fn office_names(pool: &Pool<Postgres>) -> Result<Vec<String>, AppError> {
    sqlx::query_scalar("SELECT DISTINCT name FROM case_offices ORDER BY name")
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// One record per (case, office) for cases opened on or before `until`.
/// `closed_on` is the day of the latest log that set `state` to `Closed`.
async fn case_records(
    pool: &Pool<Postgres>,
    until: chrono::NaiveDate,
) -> Result<Vec<CaseRecord>, AppError> {
    sqlx::query_as::<_, CaseRecord>(
        r#"
        SELECT lc.id AS case_id,
               co.name AS office,
               lc.created_at::date AS opened_on,
               closed.closed_on
        FROM legal_cases lc
        JOIN legal_case_case_offices lco ON lco.legal_case_id = lc.id
        JOIN case_offices co ON co.id = lco.case_office_id
        LEFT JOIN LATERAL (
            SELECT MAX(l.created_at)::date AS closed_on
            FROM logs l
            JOIN log_changes ch ON ch.log_id = l.id
            WHERE l.target_type = 'LegalCase'
              AND l.target_id = lc.id
              AND ch.field = 'state'
              AND ch.value = 'Closed'
        ) closed ON TRUE
        WHERE lc.created_at::date <= $1
        "#,
    )
    .bind(until)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Days on which each officer wrote a log, keyed by the officer's office.
async fn officer_activity(
    pool: &Pool<Postgres>,
    from: chrono::NaiveDate,
    until: chrono::NaiveDate,
) -> Result<Vec<OfficerActivity>, AppError> {
    sqlx::query_as::<_, OfficerActivity>(
        r#"
        SELECT DISTINCT co.name AS office, u.id AS user_id, l.created_at::date AS day
        FROM logs l
        JOIN users u ON u.id = l.user_id
        JOIN case_offices co ON co.id = u.case_office_id
        WHERE l.created_at::date BETWEEN $1 AND $2
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// One row per log change that set a case's `state` to `Closed`, once per
/// office handling the case.
async fn close_events(
    pool: &Pool<Postgres>,
    from: chrono::NaiveDate,
    until: chrono::NaiveDate,
) -> Result<Vec<CloseEvent>, AppError> {
    sqlx::query_as::<_, CloseEvent>(
        r#"
        SELECT co.name AS office, l.target_id AS case_id, l.created_at::date AS day
        FROM logs l
        JOIN log_changes ch ON ch.log_id = l.id
        JOIN legal_case_case_offices lco ON lco.legal_case_id = l.target_id
        JOIN case_offices co ON co.id = lco.case_office_id
        WHERE l.target_type = 'LegalCase'
          AND ch.field = 'state'
          AND ch.value = 'Closed'
          AND l.created_at::date BETWEEN $1 AND $2
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Every log written under a legal case, once per office handling it.
async fn case_activity(
    pool: &Pool<Postgres>,
    from: chrono::NaiveDate,
    until: chrono::NaiveDate,
) -> Result<Vec<CaseActivity>, AppError> {
    sqlx::query_as::<_, CaseActivity>(
        r#"
        SELECT co.name AS office, l.parent_id AS case_id, l.created_at::date AS day
        FROM logs l
        JOIN legal_case_case_offices lco ON lco.legal_case_id = l.parent_id
        JOIN case_offices co ON co.id = lco.case_office_id
        WHERE l.parent_type = 'LegalCase'
          AND l.created_at::date BETWEEN $1 AND $2
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn monthly(pool: &Pool<Postgres>, range: &SummaryRange) -> Result<DataMonthly, AppError> {
    let offices = office_names(pool).await?;
    let cases = case_records(pool, range.last_day()).await?;
    let officers = officer_activity(pool, range.start, range.last_day()).await?;
    Ok(monthly_summary(range, &offices, &cases, &officers))
}

pub async fn daily(
    pool: &Pool<Postgres>,
    range: &SummaryRange,
) -> Result<DataDailyPerMonth, AppError> {
    let offices = office_names(pool).await?;
    let cases = case_records(pool, range.last_day()).await?;
    let closes = close_events(pool, range.start, range.last_day()).await?;
    let activity = case_activity(pool, range.start, range.last_day()).await?;
    Ok(daily_summary(range, &offices, &cases, &closes, &activity))
}

pub async fn by_range(pool: &Pool<Postgres>, range: &SummaryRange) -> Result<DataByRange, AppError> {
    let monthly = monthly(pool, range).await?;
    Ok(range_summary(range, &monthly))
}
