use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, CreateLogRequest, Log, LogChange, LogQuery, RecordKind};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;

#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Log entries, oldest first", body = Vec<Log>)
    ),
    tag = "logs"
)]
pub async fn list_logs(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<LogQuery>,
) -> Result<Json<Vec<Log>>, AppError> {
    Ok(Json(crate::repo::log::list(&pool, &params).await?))
}

#[utoipa::path(
    post,
    path = "/api/logs",
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Log entry written", body = Log),
        (status = 422, description = "Missing target type or action", body = AppError)
    ),
    tag = "logs"
)]
pub async fn create_log(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<Log>), AppError> {
    if body.target_type.trim().is_empty() {
        return Err(AppError::field("target_type", "Target type is required"));
    }
    if body.action.trim().is_empty() {
        return Err(AppError::field("action", "Action is required"));
    }
    let log = crate::repo::log::create(&pool, auth.0.sub, &body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[utoipa::path(
    get,
    path = "/api/logs/{id}",
    params(("id" = i64, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Log entry", body = Log),
        (status = 404, description = "Log entry not found", body = AppError)
    ),
    tag = "logs"
)]
pub async fn get_log(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Log>, AppError> {
    crate::repo::log::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::Log, id))
}

#[utoipa::path(
    get,
    path = "/api/logs/{id}/changes",
    params(("id" = i64, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Field changes recorded by the entry", body = Vec<LogChange>)
    ),
    tag = "logs"
)]
pub async fn list_log_changes(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Vec<LogChange>>, AppError> {
    Ok(Json(crate::repo::log::list_changes(&pool, id).await?))
}
