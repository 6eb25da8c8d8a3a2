use dioxus::prelude::*;
use shared_types::{Log, LogQuery};

#[server]
pub async fn list_logs(query: LogQuery) -> Result<Vec<Log>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::log::list(get_db().await, &query)
        .await
        .map_err(|e| e.into_server_fn_error())
}
