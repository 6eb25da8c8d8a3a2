use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    AppError, CreateLegalCaseRequest, LegalCase, LegalCaseQuery, RecordKind,
    UpdateLegalCaseRequest,
};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;

#[utoipa::path(
    get,
    path = "/api/legal-cases",
    params(LegalCaseQuery),
    responses(
        (status = 200, description = "Legal cases, newest first", body = Vec<LegalCase>)
    ),
    tag = "legal-cases"
)]
pub async fn list_legal_cases(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<LegalCaseQuery>,
) -> Result<Json<Vec<LegalCase>>, AppError> {
    Ok(Json(crate::repo::legal_case::list(&pool, params.client).await?))
}

/// Open a legal case. The case number is issued by the first case office.
#[utoipa::path(
    post,
    path = "/api/legal-cases",
    request_body = CreateLegalCaseRequest,
    responses(
        (status = 201, description = "Legal case created", body = LegalCase),
        (status = 409, description = "Case number already issued", body = AppError),
        (status = 422, description = "No case office given", body = AppError)
    ),
    tag = "legal-cases"
)]
#[tracing::instrument(skip(pool, auth, body), fields(client = body.client))]
pub async fn create_legal_case(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateLegalCaseRequest>,
) -> Result<(StatusCode, Json<LegalCase>), AppError> {
    let case = crate::repo::legal_case::create(&pool, auth.0.sub, body).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

#[utoipa::path(
    get,
    path = "/api/legal-cases/{id}",
    params(("id" = i64, Path, description = "Legal case ID")),
    responses(
        (status = 200, description = "Legal case found", body = LegalCase),
        (status = 404, description = "Legal case not found", body = AppError)
    ),
    tag = "legal-cases"
)]
pub async fn get_legal_case(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<LegalCase>, AppError> {
    crate::repo::legal_case::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::LegalCase, id))
}

/// Partially update a case; every changed field is written to the audit log.
#[utoipa::path(
    patch,
    path = "/api/legal-cases/{id}",
    params(("id" = i64, Path, description = "Legal case ID")),
    request_body = UpdateLegalCaseRequest,
    responses(
        (status = 200, description = "Legal case updated", body = LegalCase),
        (status = 404, description = "Legal case not found", body = AppError)
    ),
    tag = "legal-cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn update_legal_case(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateLegalCaseRequest>,
) -> Result<Json<LegalCase>, AppError> {
    crate::repo::legal_case::update(&pool, auth.0.sub, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::LegalCase, id))
}

#[utoipa::path(
    delete,
    path = "/api/legal-cases/{id}",
    params(("id" = i64, Path, description = "Legal case ID")),
    responses(
        (status = 204, description = "Legal case deleted"),
        (status = 404, description = "Legal case not found", body = AppError)
    ),
    tag = "legal-cases"
)]
pub async fn delete_legal_case(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if crate::repo::legal_case::delete(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::LegalCase, id))
    }
}
