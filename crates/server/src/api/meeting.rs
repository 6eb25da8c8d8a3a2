use dioxus::prelude::*;
use shared_types::{CreateMeetingRequest, Meeting, UpdateMeetingRequest};

#[server]
pub async fn list_meetings(legal_case: Option<i64>) -> Result<Vec<Meeting>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::meeting::list(get_db().await, legal_case)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn get_meeting(id: i64) -> Result<Meeting, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    crate::repo::meeting::find_by_id(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::Meeting, id).into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_meeting(body: CreateMeetingRequest) -> Result<Meeting, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    let claims = super::auth::require_auth()?;
    crate::repo::meeting::create(get_db().await, claims.sub, body)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_meeting(id: i64, body: UpdateMeetingRequest) -> Result<Meeting, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    let claims = super::auth::require_auth()?;
    crate::repo::meeting::update(get_db().await, claims.sub, id, body)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::missing(RecordKind::Meeting, id).into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_meeting(id: i64) -> Result<(), ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    let deleted = crate::repo::meeting::delete(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    if !deleted {
        return Err(AppError::missing(RecordKind::Meeting, id).into_server_fn_error());
    }
    Ok(())
}
