use dioxus::prelude::*;
use shared_types::{CaseOffice, CaseType, UpdateUserRequest, User};

// ── Reference data ─────────────────────────────────────

#[server]
pub async fn list_case_offices() -> Result<Vec<CaseOffice>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::case_office::list(get_db().await)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn list_case_types() -> Result<Vec<CaseType>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::case_type::list(get_db().await)
        .await
        .map_err(|e| e.into_server_fn_error())
}

// ── Users ──────────────────────────────────────────────

#[server]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::user::list(get_db().await)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn get_user(id: i64) -> Result<User, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    crate::repo::user::find_by_id(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::User, id).into_server_fn_error())
}

/// Edit a profile. Users may only edit their own.
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_user(id: i64, body: UpdateUserRequest) -> Result<User, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::{AppErrorExt, ValidateRequest};
    use shared_types::{AppError, RecordKind};

    let claims = super::auth::require_auth()?;
    if claims.sub != id {
        return Err(AppError::forbidden("You can only edit your own profile").into_server_fn_error());
    }
    body.validate_request().map_err(|e| e.into_server_fn_error())?;

    crate::repo::user::update(get_db().await, id, body)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::User, id).into_server_fn_error())
}
