use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Instant;

use crate::config::feature_flags;
use crate::upload_staging::upload_staging;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the database is unreachable
    pub status: String,
    pub db: String,
    /// "s3" or "local"
    pub storage: String,
    /// Chunked uploads currently staged in memory
    pub open_uploads: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    fn status_code(&self) -> StatusCode {
        if self.status == "ok" {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn db_status(result: Result<i32, sqlx::Error>) -> (&'static str, String) {
    match result {
        Ok(_) => ("ok", "connected".to_string()),
        Err(e) => ("degraded", format!("error: {e}")),
    }
}

/// Health check handler. Answers 503 while the database is down.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<Pool<Postgres>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, db) = db_status(
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&pool)
            .await,
    );
    if status != "ok" {
        tracing::warn!(%db, "Health check failed");
    }

    let response = HealthResponse {
        status: status.to_string(),
        db,
        storage: if feature_flags().s3 { "s3" } else { "local" }.to_string(),
        open_uploads: upload_staging().open_sessions(),
        uptime_seconds: START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (response.status_code(), Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_degrades() {
        let (status, db) = db_status(Err(sqlx::Error::PoolTimedOut));
        assert_eq!(status, "degraded");
        assert!(db.starts_with("error: "));

        let response = HealthResponse {
            status: status.to_string(),
            db,
            storage: "local".into(),
            open_uploads: 0,
            uptime_seconds: 1,
            version: "0.1.0".into(),
        };
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn connected_database_is_ok() {
        assert_eq!(db_status(Ok(1)), ("ok", "connected".to_string()));
    }
}
