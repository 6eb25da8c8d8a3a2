use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Validation constants ────────────────────────────────────────────

/// Valid identity document types matching the DB CHECK constraint.
pub const OFFICIAL_IDENTIFIER_TYPES: &[&str] = &["national_id", "passport", "other"];

/// Check whether an identifier type string is valid.
pub fn is_valid_identifier_type(s: &str) -> bool {
    OFFICIAL_IDENTIFIER_TYPES.contains(&s)
}

/// Display label for an identifier type.
pub fn identifier_type_label(s: &str) -> &str {
    match s {
        "national_id" => "National ID",
        "passport" => "Passport",
        "other" => "Other",
        other => other,
    }
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub preferred_name: String,
    pub official_identifier: String,
    pub official_identifier_type: String,
    pub contact_number: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API types ───────────────────────────────────────────────────────

/// A person receiving legal assistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub preferred_name: String,
    pub official_identifier: String,
    pub official_identifier_type: String,
    pub contact_number: String,
    pub contact_email: String,
    /// Ids of the legal cases opened for this client.
    #[serde(default)]
    pub legal_cases: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn from_row(row: ClientRow, legal_cases: Vec<i64>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            preferred_name: row.preferred_name,
            official_identifier: row.official_identifier,
            official_identifier_type: row.official_identifier_type,
            contact_number: row.contact_number,
            contact_email: row.contact_email,
            legal_cases,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateClientRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "Name cannot be empty"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 128, message = "Preferred name cannot be empty"))
    )]
    pub preferred_name: String,
    #[serde(default)]
    pub official_identifier: String,
    pub official_identifier_type: String,
    #[serde(default)]
    pub contact_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub contact_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdateClientRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "Name cannot be empty"))
    )]
    pub name: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 128, message = "Preferred name cannot be empty"))
    )]
    pub preferred_name: Option<String>,
    pub official_identifier: Option<String>,
    pub official_identifier_type: Option<String>,
    pub contact_number: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub contact_email: Option<String>,
}

/// Query string for `GET /api/clients`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ClientQuery {
    /// Only clients with a legal case in this office.
    #[serde(rename = "caseOffice")]
    pub case_office: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_types() {
        assert!(is_valid_identifier_type("passport"));
        assert!(!is_valid_identifier_type("Passport"));
        assert_eq!(identifier_type_label("national_id"), "National ID");
        assert_eq!(identifier_type_label("unknown"), "unknown");
    }

    #[test]
    fn client_query_uses_camel_case_office() {
        let q: ClientQuery = serde_json::from_str(r#"{"caseOffice":2}"#).unwrap();
        assert_eq!(q.case_office, Some(2));
    }

    #[test]
    fn from_row_attaches_cases() {
        let now = Utc::now();
        let row = ClientRow {
            id: 1,
            name: "Lerato Dlamini".into(),
            preferred_name: "Lerato".into(),
            official_identifier: "8001015009087".into(),
            official_identifier_type: "national_id".into(),
            contact_number: "0825550199".into(),
            contact_email: "lerato@example.org".into(),
            created_at: now,
            updated_at: now,
        };
        let client = Client::from_row(row, vec![3, 5]);
        assert_eq!(client.legal_cases, vec![3, 5]);
        assert_eq!(client.preferred_name, "Lerato");
    }
}
