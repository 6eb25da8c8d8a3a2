use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    AppError, CreateMeetingRequest, Meeting, MeetingQuery, RecordKind, UpdateMeetingRequest,
};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;

#[utoipa::path(
    get,
    path = "/api/meetings",
    params(MeetingQuery),
    responses(
        (status = 200, description = "Meetings, latest first", body = Vec<Meeting>)
    ),
    tag = "meetings"
)]
pub async fn list_meetings(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<MeetingQuery>,
) -> Result<Json<Vec<Meeting>>, AppError> {
    Ok(Json(crate::repo::meeting::list(&pool, params.legal_case).await?))
}

/// Location, meeting type and notes are required; blanks come back as
/// 422 with one message per field.
#[utoipa::path(
    post,
    path = "/api/meetings",
    request_body = CreateMeetingRequest,
    responses(
        (status = 201, description = "Meeting created", body = Meeting),
        (status = 422, description = "Required fields missing", body = AppError)
    ),
    tag = "meetings"
)]
pub async fn create_meeting(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<Meeting>), AppError> {
    let meeting = crate::repo::meeting::create(&pool, auth.0.sub, body).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

#[utoipa::path(
    get,
    path = "/api/meetings/{id}",
    params(("id" = i64, Path, description = "Meeting ID")),
    responses(
        (status = 200, description = "Meeting found", body = Meeting),
        (status = 404, description = "Meeting not found", body = AppError)
    ),
    tag = "meetings"
)]
pub async fn get_meeting(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Meeting>, AppError> {
    crate::repo::meeting::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::Meeting, id))
}

#[utoipa::path(
    patch,
    path = "/api/meetings/{id}",
    params(("id" = i64, Path, description = "Meeting ID")),
    request_body = UpdateMeetingRequest,
    responses(
        (status = 200, description = "Meeting updated", body = Meeting),
        (status = 404, description = "Meeting not found", body = AppError),
        (status = 422, description = "Required fields blank", body = AppError)
    ),
    tag = "meetings"
)]
pub async fn update_meeting(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMeetingRequest>,
) -> Result<Json<Meeting>, AppError> {
    crate::repo::meeting::update(&pool, auth.0.sub, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::Meeting, id))
}

#[utoipa::path(
    delete,
    path = "/api/meetings/{id}",
    params(("id" = i64, Path, description = "Meeting ID")),
    responses(
        (status = 204, description = "Meeting deleted"),
        (status = 404, description = "Meeting not found", body = AppError)
    ),
    tag = "meetings"
)]
pub async fn delete_meeting(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if crate::repo::meeting::delete(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::Meeting, id))
    }
}
