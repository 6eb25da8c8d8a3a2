use dioxus::prelude::*;
use shared_types::{DataDailyPerMonth, DataMonthly, SummaryQuery};

// ── Dashboard Server Functions ─────────────────────────

#[server]
pub async fn get_monthly_summary(query: SummaryQuery) -> Result<DataMonthly, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::dashboard::SummaryRange;

    super::auth::require_auth()?;
    let range = SummaryRange::from_query(&query, chrono::Utc::now().date_naive())
        .map_err(|e| e.into_server_fn_error())?;
    crate::repo::dashboard::monthly(get_db().await, &range)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn get_daily_summary(query: SummaryQuery) -> Result<DataDailyPerMonth, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::dashboard::SummaryRange;

    super::auth::require_auth()?;
    let range = SummaryRange::from_query(&query, chrono::Utc::now().date_naive())
        .map_err(|e| e.into_server_fn_error())?;
    crate::repo::dashboard::daily(get_db().await, &range)
        .await
        .map_err(|e| e.into_server_fn_error())
}
