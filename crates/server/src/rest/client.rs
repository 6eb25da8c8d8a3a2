use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    AppError, Client, ClientQuery, CreateClientRequest, RecordKind, UpdateClientRequest,
};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use crate::error_convert::ValidateRequest;

#[utoipa::path(
    get,
    path = "/api/clients",
    params(ClientQuery),
    responses(
        (status = 200, description = "Clients, optionally limited to one case office", body = Vec<Client>)
    ),
    tag = "clients"
)]
pub async fn list_clients(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<ClientQuery>,
) -> Result<Json<Vec<Client>>, AppError> {
    Ok(Json(crate::repo::client::list(&pool, params.case_office).await?))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn create_client(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    body.validate_request()?;
    let client = crate::repo::client::create(&pool, body).await?;
    tracing::info!(client_id = client.id, user_id = auth.0.sub, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "Client not found", body = AppError)
    ),
    tag = "clients"
)]
pub async fn get_client(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Client>, AppError> {
    crate::repo::client::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::Client, id))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "clients"
)]
pub async fn update_client(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<Json<Client>, AppError> {
    body.validate_request()?;
    crate::repo::client::update(&pool, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::Client, id))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = AppError)
    ),
    tag = "clients"
)]
pub async fn delete_client(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if crate::repo::client::delete(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::Client, id))
    }
}
