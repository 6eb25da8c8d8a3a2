use axum::{
    extract::{Path, State},
    Json,
};
use shared_types::{AppError, RecordKind, UpdateUserRequest, User};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use crate::error_convert::ValidateRequest;

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    crate::repo::user::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::User, id))
}

/// Officers may only edit their own profile.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 403, description = "Not your profile", body = AppError),
        (status = 404, description = "User not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    if claims.sub != id {
        return Err(AppError::forbidden("You can only edit your own profile"));
    }
    body.validate_request()?;

    crate::repo::user::update(&pool, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::User, id))
}
