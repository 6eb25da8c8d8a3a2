use dioxus::prelude::*;
use shared_types::{Client, CreateClientRequest, UpdateClientRequest};

// ── Client Server Functions ────────────────────────────

/// List clients, optionally only those with a case in `case_office`.
#[server]
pub async fn list_clients(case_office: Option<i64>) -> Result<Vec<Client>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::client::list(get_db().await, case_office)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn get_client(id: i64) -> Result<Client, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    crate::repo::client::find_by_id(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::Client, id).into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_client(body: CreateClientRequest) -> Result<Client, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, ValidateRequest};

    super::auth::require_auth()?;
    body.validate_request().map_err(|e| e.into_server_fn_error())?;
    let client = crate::repo::client::create(get_db().await, body)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    tracing::info!(client_id = client.id, "Client created");
    Ok(client)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_client(id: i64, body: UpdateClientRequest) -> Result<Client, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, ValidateRequest};
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    body.validate_request().map_err(|e| e.into_server_fn_error())?;
    crate::repo::client::update(get_db().await, id, body)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::Client, id).into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_client(id: i64) -> Result<(), ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    let deleted = crate::repo::client::delete(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    if !deleted {
        return Err(AppError::missing(RecordKind::Client, id).into_server_fn_error());
    }
    Ok(())
}
