use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    AppError, CaseOffice, CreateCaseOfficeRequest, RecordKind, UpdateCaseOfficeRequest,
};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use crate::error_convert::ValidateRequest;

#[utoipa::path(
    get,
    path = "/api/case-offices",
    responses(
        (status = 200, description = "All case offices", body = Vec<CaseOffice>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "case-offices"
)]
pub async fn list_case_offices(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
) -> Result<Json<Vec<CaseOffice>>, AppError> {
    Ok(Json(crate::repo::case_office::list(&pool).await?))
}

#[utoipa::path(
    post,
    path = "/api/case-offices",
    request_body = CreateCaseOfficeRequest,
    responses(
        (status = 201, description = "Case office created", body = CaseOffice),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "case-offices"
)]
pub async fn create_case_office(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateCaseOfficeRequest>,
) -> Result<(StatusCode, Json<CaseOffice>), AppError> {
    body.validate_request()?;
    let office = crate::repo::case_office::create(&pool, body).await?;
    Ok((StatusCode::CREATED, Json(office)))
}

#[utoipa::path(
    get,
    path = "/api/case-offices/{id}",
    params(("id" = i64, Path, description = "Case office ID")),
    responses(
        (status = 200, description = "Case office found", body = CaseOffice),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-offices"
)]
pub async fn get_case_office(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<CaseOffice>, AppError> {
    crate::repo::case_office::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::CaseOffice, id))
}

#[utoipa::path(
    patch,
    path = "/api/case-offices/{id}",
    params(("id" = i64, Path, description = "Case office ID")),
    request_body = UpdateCaseOfficeRequest,
    responses(
        (status = 200, description = "Case office updated", body = CaseOffice),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-offices"
)]
pub async fn update_case_office(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCaseOfficeRequest>,
) -> Result<Json<CaseOffice>, AppError> {
    crate::repo::case_office::update(&pool, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::CaseOffice, id))
}

#[utoipa::path(
    delete,
    path = "/api/case-offices/{id}",
    params(("id" = i64, Path, description = "Case office ID")),
    responses(
        (status = 204, description = "Case office deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-offices"
)]
pub async fn delete_case_office(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if crate::repo::case_office::delete(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::CaseOffice, id))
    }
}
