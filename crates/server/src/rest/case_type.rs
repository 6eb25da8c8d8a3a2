use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, CaseType, CreateCaseTypeRequest, RecordKind, UpdateCaseTypeRequest};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use crate::error_convert::ValidateRequest;

#[utoipa::path(
    get,
    path = "/api/case-types",
    responses(
        (status = 200, description = "All case types", body = Vec<CaseType>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "case-types"
)]
pub async fn list_case_types(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
) -> Result<Json<Vec<CaseType>>, AppError> {
    Ok(Json(crate::repo::case_type::list(&pool).await?))
}

#[utoipa::path(
    post,
    path = "/api/case-types",
    request_body = CreateCaseTypeRequest,
    responses(
        (status = 201, description = "Case type created", body = CaseType),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "case-types"
)]
pub async fn create_case_type(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateCaseTypeRequest>,
) -> Result<(StatusCode, Json<CaseType>), AppError> {
    body.validate_request()?;
    let office = crate::repo::case_type::create(&pool, body).await?;
    Ok((StatusCode::CREATED, Json(office)))
}

#[utoipa::path(
    get,
    path = "/api/case-types/{id}",
    params(("id" = i64, Path, description = "Case type ID")),
    responses(
        (status = 200, description = "Case type found", body = CaseType),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-types"
)]
pub async fn get_case_type(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<CaseType>, AppError> {
    crate::repo::case_type::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::CaseType, id))
}

#[utoipa::path(
    patch,
    path = "/api/case-types/{id}",
    params(("id" = i64, Path, description = "Case type ID")),
    request_body = UpdateCaseTypeRequest,
    responses(
        (status = 200, description = "Case type updated", body = CaseType),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-types"
)]
pub async fn update_case_type(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCaseTypeRequest>,
) -> Result<Json<CaseType>, AppError> {
    crate::repo::case_type::update(&pool, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::CaseType, id))
}

#[utoipa::path(
    delete,
    path = "/api/case-types/{id}",
    params(("id" = i64, Path, description = "Case type ID")),
    responses(
        (status = 204, description = "Case type deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-types"
)]
pub async fn delete_case_type(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if crate::repo::case_type::delete(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::CaseType, id))
    }
}
