use dioxus::prelude::*;
use shared_types::{CaseUpdate, CaseUpdateRequest};

/// Updates posted to a case, newest first.
#[server]
pub async fn list_case_updates(legal_case: i64) -> Result<Vec<CaseUpdate>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::case_update::list(get_db().await, Some(legal_case))
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_case_update(body: CaseUpdateRequest) -> Result<CaseUpdate, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    let claims = super::auth::require_auth()?;
    crate::repo::case_update::create(get_db().await, claims.sub, body)
        .await
        .map_err(|e| e.into_server_fn_error())
}
