use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Case offices ────────────────────────────────────────────────────

/// A regional office handling legal cases. `case_office_code` prefixes
/// every case number issued by the office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseOffice {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub case_office_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateCaseOfficeRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 500, message = "Name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 16, message = "Office code is required"))
    )]
    pub case_office_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCaseOfficeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub case_office_code: Option<String>,
}

// ── Case types ──────────────────────────────────────────────────────

/// Category of legal matter, e.g. eviction or labour dispute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseType {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateCaseTypeRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCaseTypeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}
