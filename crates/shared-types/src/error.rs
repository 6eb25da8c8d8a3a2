use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors. Each kind maps to one HTTP status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    DatabaseError,
    Unauthorized,
    Forbidden,
    InternalError,
}

impl AppErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::BadRequest => "BadRequest",
            Self::ValidationError => "ValidationError",
            Self::Conflict => "Conflict",
            Self::DatabaseError => "DatabaseError",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::InternalError => "InternalError",
        }
    }

    pub fn status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::ValidationError => 422,
            Self::Conflict => 409,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::DatabaseError | Self::InternalError => 500,
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Casebook records a lookup can miss, named the way messages show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Client,
    LegalCase,
    CaseFile,
    CaseOffice,
    CaseType,
    Meeting,
    Log,
    User,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Client => "Client",
            Self::LegalCase => "Legal case",
            Self::CaseFile => "Case file",
            Self::CaseOffice => "Case office",
            Self::CaseType => "Case type",
            Self::Meeting => "Meeting",
            Self::Log => "Log",
            Self::User => "User",
        })
    }
}

/// Structured error shared by the REST handlers, server functions and UI.
/// `field_errors` maps form fields to the message shown beside them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    /// `"Legal case 7 not found"` and friends.
    pub fn missing(record: RecordKind, id: i64) -> Self {
        Self::not_found(format!("{record} {id} not found"))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message)
    }

    /// Validation failure on a single field; the message doubles as the
    /// field's message.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(AppErrorKind::ValidationError, message.clone()).with_field(field, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            field_errors,
            ..Self::new(AppErrorKind::ValidationError, message)
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::DatabaseError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    /// Attach a message to `field`, replacing any earlier one.
    pub fn with_field(mut self, field: &str, message: impl Into<String>) -> Self {
        self.field_errors.insert(field.to_string(), message.into());
        self
    }

    pub fn status_code_u16(&self) -> u16 {
        self.kind.status()
    }

    /// Recover the error a server function returned from its
    /// `ServerFnError` text, which wraps the JSON like
    /// `error running server function: {"kind":...} (details: None)`.
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        if let Ok(err) = serde_json::from_str::<Self>(error_message) {
            return Some(err);
        }
        let start = error_message.find('{')?;
        let end = error_message.rfind('}')?;
        (end > start)
            .then(|| serde_json::from_str(&error_message[start..=end]).ok())
            .flatten()
    }

    /// Field messages for a form, empty when the error carries none.
    pub fn parse_field_errors(error_string: &str) -> HashMap<String, String> {
        Self::from_server_error(error_string)
            .map(|e| e.field_errors)
            .unwrap_or_default()
    }

    /// Message for a notice banner, with a generic fallback.
    pub fn friendly_message(error_string: &str) -> String {
        Self::from_server_error(error_string)
            .map(|e| e.message)
            .unwrap_or_else(|| "Something went wrong. Please try again.".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let first = errs.first()?;
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"));
                Some((field.to_string(), msg))
            })
            .fold(
                AppError::validation("Validation failed", HashMap::new()),
                |err, (field, msg)| err.with_field(&field, msg),
            )
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_the_record() {
        let err = AppError::missing(RecordKind::LegalCase, 7);
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Legal case 7 not found");
        assert_eq!(
            AppError::missing(RecordKind::CaseFile, 3).message,
            "Case file 3 not found"
        );
    }

    #[test]
    fn server_fn_text_yields_the_error() {
        let raw = r#"{"kind":"Unauthorized","message":"Invalid credentials"}"#;
        assert_eq!(
            AppError::from_server_error(raw).unwrap(),
            AppError::unauthorized("Invalid credentials")
        );

        let wrapped = r#"error running server function: {"kind":"NotFound","message":"Meeting 4 not found"} (details: None)"#;
        assert_eq!(
            AppError::from_server_error(wrapped).unwrap(),
            AppError::missing(RecordKind::Meeting, 4)
        );

        assert!(AppError::from_server_error("not json at all").is_none());
        assert!(AppError::from_server_error("} oops {").is_none());
    }

    #[test]
    fn form_helpers_read_wrapped_meeting_errors() {
        let err = AppError::validation("Meeting is incomplete", HashMap::new())
            .with_field("location", "Location cannot be empty")
            .with_field("notes", "Notes cannot be empty");
        let text = format!(
            "error running server function: {} (details: None)",
            serde_json::to_string(&err).unwrap()
        );

        let fields = AppError::parse_field_errors(&text);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["location"], "Location cannot be empty");
        assert_eq!(AppError::friendly_message(&text), "Meeting is incomplete");
        assert_eq!(
            AppError::friendly_message("connection reset"),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn field_error_uses_one_message() {
        let err = AppError::field("case_offices", "Select at least one case office");
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.message, "Select at least one case office");
        assert_eq!(err.field_errors["case_offices"], err.message);
        assert_eq!(err.status_code_u16(), 422);
    }

    #[test]
    fn kinds_map_to_statuses() {
        let cases = [
            (AppError::missing(RecordKind::Client, 1), 404),
            (AppError::bad_request("startMonth query param must be in format yyyy-mm"), 400),
            (AppError::conflict("A legal case with this number already exists"), 409),
            (AppError::unauthorized("Missing token"), 401),
            (AppError::forbidden("You can only edit your own profile"), 403),
            (AppError::database("pool timed out"), 500),
            (AppError::internal("storage offline"), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code_u16(), status, "{err}");
        }
    }

    #[test]
    fn display_prefixes_the_kind() {
        let err = AppError::forbidden("You can only edit your own profile");
        assert_eq!(err.to_string(), "Forbidden: You can only edit your own profile");
    }

    #[test]
    fn empty_field_errors_are_omitted_from_json() {
        let json = serde_json::to_value(AppError::missing(RecordKind::Log, 9)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "NotFound", "message": "Log 9 not found" })
        );
    }
}
