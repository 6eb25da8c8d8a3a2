use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, CaseUpdate, CaseUpdateQuery, CaseUpdateRequest};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;

#[utoipa::path(
    get,
    path = "/api/case-updates",
    params(CaseUpdateQuery),
    responses(
        (status = 200, description = "Case updates, newest first", body = Vec<CaseUpdate>)
    ),
    tag = "case-updates"
)]
pub async fn list_case_updates(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CaseUpdateQuery>,
) -> Result<Json<Vec<CaseUpdate>>, AppError> {
    Ok(Json(crate::repo::case_update::list(&pool, params.legal_case).await?))
}

/// Post a note, meeting or file-only update to a legal case.
#[utoipa::path(
    post,
    path = "/api/case-updates",
    request_body = CaseUpdateRequest,
    responses(
        (status = 201, description = "Update recorded", body = CaseUpdate),
        (status = 400, description = "Not exactly one of note, meeting or files", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "case-updates"
)]
#[tracing::instrument(skip(pool, auth, body), fields(legal_case = body.legal_case))]
pub async fn create_case_update(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CaseUpdateRequest>,
) -> Result<(StatusCode, Json<CaseUpdate>), AppError> {
    let update = crate::repo::case_update::create(&pool, auth.0.sub, body).await?;
    Ok((StatusCode::CREATED, Json(update)))
}
