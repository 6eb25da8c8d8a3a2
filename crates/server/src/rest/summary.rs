use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use shared_types::dashboard::SummaryRange;
use shared_types::{AppError, DataByRange, DataDailyPerMonth, DataMonthly, SummaryQuery};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;

fn resolve(query: &SummaryQuery) -> Result<SummaryRange, AppError> {
    SummaryRange::from_query(query, Utc::now().date_naive())
}

/// Monthly metrics per case office.
#[utoipa::path(
    get,
    path = "/api/summary/monthly",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Monthly series per office", body = DataMonthly),
        (status = 400, description = "Month not in yyyy-mm format", body = AppError)
    ),
    tag = "summary"
)]
pub async fn monthly_summary(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<DataMonthly>, AppError> {
    let range = resolve(&params)?;
    Ok(Json(crate::repo::dashboard::monthly(&pool, &range).await?))
}

/// Daily metrics per case office, grouped by month.
#[utoipa::path(
    get,
    path = "/api/summary/daily",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Daily series per office and month", body = DataDailyPerMonth),
        (status = 400, description = "Month not in yyyy-mm format", body = AppError)
    ),
    tag = "summary"
)]
pub async fn daily_summary(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<DataDailyPerMonth>, AppError> {
    let range = resolve(&params)?;
    Ok(Json(crate::repo::dashboard::daily(&pool, &range).await?))
}

/// Totals per case office over the whole range.
#[utoipa::path(
    get,
    path = "/api/summary/range",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Range totals per office", body = DataByRange),
        (status = 400, description = "Month not in yyyy-mm format", body = AppError)
    ),
    tag = "summary"
)]
pub async fn range_summary(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<DataByRange>, AppError> {
    let range = resolve(&params)?;
    Ok(Json(crate::repo::dashboard::by_range(&pool, &range).await?))
}
