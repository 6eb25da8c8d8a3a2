use axum::Router;
use shared_types::{
    AppError, AppErrorKind, AuthUser, CaseOffice, CaseType, CaseUpdate, CaseUpdateRequest,
    Client, CreateCaseOfficeRequest, CreateCaseTypeRequest, CreateClientRequest,
    CreateLegalCaseRequest, CreateLogRequest, CreateMeetingRequest, Credentials, DataByRange,
    DataDailyPerMonth, DataMonthly, DataPoint, LegalCase, LegalCaseFile, LegalCaseState, Log,
    LogChange, Meeting, MeetingUpdate, NewLogChange, NoteUpdate, TokenResponse,
    UpdateCaseOfficeRequest, UpdateCaseTypeRequest, UpdateClientRequest,
    UpdateLegalCaseFileRequest, UpdateLegalCaseRequest, UpdateMeetingRequest, UpdateUserRequest,
    User,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session
        rest::auth::obtain_token,
        // Reference data
        rest::case_office::list_case_offices,
        rest::case_office::create_case_office,
        rest::case_office::get_case_office,
        rest::case_office::update_case_office,
        rest::case_office::delete_case_office,
        rest::case_type::list_case_types,
        rest::case_type::create_case_type,
        rest::case_type::get_case_type,
        rest::case_type::update_case_type,
        rest::case_type::delete_case_type,
        // Users
        rest::user::get_user,
        rest::user::update_user,
        // Clients
        rest::client::list_clients,
        rest::client::create_client,
        rest::client::get_client,
        rest::client::update_client,
        rest::client::delete_client,
        // Legal cases
        rest::legal_case::list_legal_cases,
        rest::legal_case::create_legal_case,
        rest::legal_case::get_legal_case,
        rest::legal_case::update_legal_case,
        rest::legal_case::delete_legal_case,
        // Meetings
        rest::meeting::list_meetings,
        rest::meeting::create_meeting,
        rest::meeting::get_meeting,
        rest::meeting::update_meeting,
        rest::meeting::delete_meeting,
        // Case files
        rest::case_file::list_case_files,
        rest::case_file::upload_case_file,
        rest::case_file::get_case_file,
        rest::case_file::update_case_file,
        rest::case_file::delete_case_file,
        rest::case_file::download_case_file,
        // Case updates
        rest::case_update::list_case_updates,
        rest::case_update::create_case_update,
        // Audit log
        rest::log::list_logs,
        rest::log::create_log,
        rest::log::get_log,
        rest::log::list_log_changes,
        // Dashboard
        rest::summary::monthly_summary,
        rest::summary::daily_summary,
        rest::summary::range_summary,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        Credentials, TokenResponse, AuthUser, User, UpdateUserRequest,
        CaseOffice, CreateCaseOfficeRequest, UpdateCaseOfficeRequest,
        CaseType, CreateCaseTypeRequest, UpdateCaseTypeRequest,
        Client, CreateClientRequest, UpdateClientRequest,
        LegalCase, LegalCaseState, CreateLegalCaseRequest, UpdateLegalCaseRequest,
        Meeting, CreateMeetingRequest, UpdateMeetingRequest,
        LegalCaseFile, UpdateLegalCaseFileRequest,
        CaseUpdate, CaseUpdateRequest, NoteUpdate, MeetingUpdate,
        Log, LogChange, NewLogChange, CreateLogRequest,
        DataPoint, DataMonthly, DataDailyPerMonth, DataByRange,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "case-offices", description = "Case office reference data"),
        (name = "case-types", description = "Case type reference data"),
        (name = "users", description = "Caseworker profiles"),
        (name = "clients", description = "Client records"),
        (name = "legal-cases", description = "Legal cases and their workflow state"),
        (name = "meetings", description = "Meetings held on a legal case"),
        (name = "legal-case-files", description = "Documents attached to legal cases"),
        (name = "case-updates", description = "Notes, meetings and file bundles posted to a case"),
        (name = "logs", description = "Audit log of changes"),
        (name = "summary", description = "Dashboard metrics per case office"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Casebook API",
        description = "Legal aid case management API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(AppState { pool })
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
