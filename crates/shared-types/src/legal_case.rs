use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Lifecycle state ─────────────────────────────────────────────────

/// Lifecycle state of a legal case. Stored as the variant name, which
/// the `legal_cases.state` CHECK constraint mirrors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LegalCaseState {
    #[default]
    Opened,
    InProgress,
    Hanging,
    Pending,
    Referred,
    Resolved,
    Escalated,
    Closed,
}

/// Every state in workflow order, as offered by the status selects.
pub const LEGAL_CASE_STATES: &[LegalCaseState] = &[
    LegalCaseState::Opened,
    LegalCaseState::InProgress,
    LegalCaseState::Hanging,
    LegalCaseState::Pending,
    LegalCaseState::Referred,
    LegalCaseState::Resolved,
    LegalCaseState::Escalated,
    LegalCaseState::Closed,
];

impl LegalCaseState {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalCaseState::Opened => "Opened",
            LegalCaseState::InProgress => "InProgress",
            LegalCaseState::Hanging => "Hanging",
            LegalCaseState::Pending => "Pending",
            LegalCaseState::Referred => "Referred",
            LegalCaseState::Resolved => "Resolved",
            LegalCaseState::Escalated => "Escalated",
            LegalCaseState::Closed => "Closed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LegalCaseState::InProgress => "In Progress",
            other => other.as_str(),
        }
    }

    /// Parse the storage representation. Unknown strings are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        LEGAL_CASE_STATES.iter().copied().find(|st| st.as_str() == s)
    }
}

impl fmt::Display for LegalCaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Case numbers ────────────────────────────────────────────────────

/// Build a case number as `{office_code}/{yymm}/{next_id:04}`.
///
/// `next_id` is one past the latest legal case id at creation time.
pub fn generate_case_number(office_code: &str, today: NaiveDate, next_id: i64) -> String {
    format!("{}/{}/{:04}", office_code, today.format("%y%m"), next_id)
}

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct LegalCaseRow {
    pub id: i64,
    pub case_number: String,
    pub state: String,
    pub client_id: i64,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API types ───────────────────────────────────────────────────────

/// A legal case with its many-to-many relations flattened to id lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LegalCase {
    pub id: i64,
    pub case_number: String,
    pub state: LegalCaseState,
    pub client: i64,
    pub summary: String,
    #[serde(default)]
    pub users: Vec<i64>,
    #[serde(default)]
    pub case_types: Vec<i64>,
    #[serde(default)]
    pub case_offices: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Relation ids loaded alongside a [`LegalCaseRow`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegalCaseRelations {
    pub users: Vec<i64>,
    pub case_types: Vec<i64>,
    pub case_offices: Vec<i64>,
}

impl LegalCase {
    pub fn from_row(row: LegalCaseRow, rel: LegalCaseRelations) -> Self {
        Self {
            id: row.id,
            case_number: row.case_number,
            state: LegalCaseState::parse(&row.state).unwrap_or_default(),
            client: row.client_id,
            summary: row.summary,
            users: rel.users,
            case_types: rel.case_types,
            case_offices: rel.case_offices,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateLegalCaseRequest {
    pub client: i64,
    #[serde(default)]
    pub state: LegalCaseState,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub users: Vec<i64>,
    #[serde(default)]
    pub case_types: Vec<i64>,
    /// The first office issues the case number.
    #[serde(default)]
    pub case_offices: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateLegalCaseRequest {
    pub state: Option<LegalCaseState>,
    pub summary: Option<String>,
    pub users: Option<Vec<i64>>,
    pub case_types: Option<Vec<i64>>,
    pub case_offices: Option<Vec<i64>>,
}

impl UpdateLegalCaseRequest {
    /// A patch that only moves the case to `state`.
    pub fn state(state: LegalCaseState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }
}

/// Query string for `GET /api/legal-cases`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct LegalCaseQuery {
    pub client: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_has_spaced_label() {
        assert_eq!(LegalCaseState::InProgress.label(), "In Progress");
        assert_eq!(LegalCaseState::InProgress.as_str(), "InProgress");
        assert_eq!(LegalCaseState::Closed.to_string(), "Closed");
    }

    #[test]
    fn parse_accepts_every_state_and_rejects_labels() {
        for st in LEGAL_CASE_STATES {
            assert_eq!(LegalCaseState::parse(st.as_str()), Some(*st));
        }
        assert_eq!(LegalCaseState::parse("In Progress"), None);
        assert_eq!(LegalCaseState::parse("closed"), None);
    }

    #[test]
    fn states_serialize_as_names() {
        let json = serde_json::to_string(&LegalCaseState::InProgress).unwrap();
        assert_eq!(json, r#""InProgress""#);
    }

    #[test]
    fn case_number_pads_id_and_uses_year_month() {
        let day = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        assert_eq!(generate_case_number("JHB", day, 7), "JHB/2103/0007");
        assert_eq!(generate_case_number("CPT", day, 12345), "CPT/2103/12345");
    }

    #[test]
    fn create_request_defaults_to_opened() {
        let req: CreateLegalCaseRequest =
            serde_json::from_str(r#"{"client":1,"case_offices":[2]}"#).unwrap();
        assert_eq!(req.state, LegalCaseState::Opened);
        assert!(req.users.is_empty());
        assert_eq!(req.case_offices, vec![2]);
    }

    #[test]
    fn from_row_parses_state() {
        let now = Utc::now();
        let row = LegalCaseRow {
            id: 9,
            case_number: "JHB/2103/0009".into(),
            state: "Escalated".into(),
            client_id: 3,
            summary: String::new(),
            created_at: now,
            updated_at: now,
        };
        let case = LegalCase::from_row(
            row,
            LegalCaseRelations {
                case_offices: vec![1],
                ..Default::default()
            },
        );
        assert_eq!(case.state, LegalCaseState::Escalated);
        assert_eq!(case.client, 3);
        assert_eq!(case.case_offices, vec![1]);
    }
}
