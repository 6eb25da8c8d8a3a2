pub mod auth;
pub mod case_file;
pub mod case_office;
pub mod case_type;
pub mod case_update;
pub mod client;
pub mod legal_case;
pub mod log;
pub mod meeting;
pub mod summary;
pub mod user;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use crate::db::AppState;

/// Build the REST API router. Auth claims come from `auth_middleware`,
/// which the caller layers on.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/token", post(auth::obtain_token))
        // Reference data
        .route("/api/case-offices", get(case_office::list_case_offices).post(case_office::create_case_office))
        .route(
            "/api/case-offices/{id}",
            get(case_office::get_case_office)
                .patch(case_office::update_case_office)
                .delete(case_office::delete_case_office),
        )
        .route("/api/case-types", get(case_type::list_case_types).post(case_type::create_case_type))
        .route(
            "/api/case-types/{id}",
            get(case_type::get_case_type)
                .patch(case_type::update_case_type)
                .delete(case_type::delete_case_type),
        )
        // Users
        .route("/api/users/{id}", get(user::get_user).patch(user::update_user))
        // Clients
        .route("/api/clients", get(client::list_clients).post(client::create_client))
        .route(
            "/api/clients/{id}",
            get(client::get_client)
                .patch(client::update_client)
                .delete(client::delete_client),
        )
        // Legal cases
        .route("/api/legal-cases", get(legal_case::list_legal_cases).post(legal_case::create_legal_case))
        .route(
            "/api/legal-cases/{id}",
            get(legal_case::get_legal_case)
                .patch(legal_case::update_legal_case)
                .delete(legal_case::delete_legal_case),
        )
        // Meetings
        .route("/api/meetings", get(meeting::list_meetings).post(meeting::create_meeting))
        .route(
            "/api/meetings/{id}",
            get(meeting::get_meeting)
                .patch(meeting::update_meeting)
                .delete(meeting::delete_meeting),
        )
        // Case files
        .route(
            "/api/legal-case-files",
            get(case_file::list_case_files)
                .post(case_file::upload_case_file)
                .layer(DefaultBodyLimit::max(crate::config::max_upload_bytes())),
        )
        .route(
            "/api/legal-case-files/{id}",
            get(case_file::get_case_file)
                .patch(case_file::update_case_file)
                .delete(case_file::delete_case_file),
        )
        .route("/api/legal-case-files/{id}/download", get(case_file::download_case_file))
        // Case updates
        .route("/api/case-updates", get(case_update::list_case_updates).post(case_update::create_case_update))
        // Audit log
        .route("/api/logs", get(log::list_logs).post(log::create_log))
        .route("/api/logs/{id}", get(log::get_log))
        .route("/api/logs/{id}/changes", get(log::list_log_changes))
        // Dashboard
        .route("/api/summary/monthly", get(summary::monthly_summary))
        .route("/api/summary/daily", get(summary::daily_summary))
        .route("/api/summary/range", get(summary::range_summary))
}
