use axum::{extract::State, Json};
use shared_types::{AppError, Credentials, TokenResponse};
use sqlx::{Pool, Postgres};

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/token",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Bad credentials", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, body), fields(username = %body.username))]
pub async fn obtain_token(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    let (user, token) = crate::auth::session::authenticate(&pool, &body).await?;
    Ok(Json(TokenResponse {
        token,
        user_id: user.id,
    }))
}
