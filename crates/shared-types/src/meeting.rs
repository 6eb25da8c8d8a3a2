use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Format of the `datetime-local` input used by the meeting form.
pub const MEETING_DATE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const LOCATION_REQUIRED: &str = "Location cannot be empty";
pub const MEETING_TYPE_REQUIRED: &str = "Meeting type cannot be empty";
pub const NOTES_REQUIRED: &str = "Note cannot be empty";

/// A meeting held with or about a client, attached to a legal case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Meeting {
    pub id: i64,
    pub legal_case: i64,
    #[serde(default)]
    pub name: String,
    pub location: String,
    pub meeting_type: String,
    pub meeting_date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMeetingRequest {
    pub legal_case: i64,
    #[serde(default)]
    pub name: String,
    pub location: String,
    pub meeting_type: String,
    pub meeting_date: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateMeetingRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub meeting_type: Option<String>,
    pub meeting_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Query string for `GET /api/meetings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct MeetingQuery {
    pub legal_case: Option<i64>,
}

/// Required-field check shared by the form and the server. Returns one
/// message per blank field, keyed by field name.
pub fn validate_meeting_fields(
    location: &str,
    meeting_type: &str,
    notes: &str,
) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    if location.trim().is_empty() {
        errors.insert("location".to_string(), LOCATION_REQUIRED.to_string());
    }
    if meeting_type.trim().is_empty() {
        errors.insert("meeting_type".to_string(), MEETING_TYPE_REQUIRED.to_string());
    }
    if notes.trim().is_empty() {
        errors.insert("notes".to_string(), NOTES_REQUIRED.to_string());
    }
    errors
}

impl CreateMeetingRequest {
    pub fn field_errors(&self) -> HashMap<String, String> {
        validate_meeting_fields(&self.location, &self.meeting_type, &self.notes)
    }
}

impl UpdateMeetingRequest {
    /// Only fields present in the patch are checked.
    pub fn field_errors(&self) -> HashMap<String, String> {
        validate_meeting_fields(
            self.location.as_deref().unwrap_or("-"),
            self.meeting_type.as_deref().unwrap_or("-"),
            self.notes.as_deref().unwrap_or("-"),
        )
    }
}

// ── Form state ──────────────────────────────────────────────────────

/// Editable state behind the meeting form. `meeting_date` holds the raw
/// `datetime-local` input value.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDraft {
    pub location: String,
    pub meeting_type: String,
    pub meeting_date: String,
    pub notes: String,
}

impl MeetingDraft {
    /// Blank draft dated `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            location: String::new(),
            meeting_type: String::new(),
            meeting_date: now.format(MEETING_DATE_INPUT_FORMAT).to_string(),
            notes: String::new(),
        }
    }

    pub fn from_meeting(m: &Meeting) -> Self {
        Self {
            location: m.location.clone(),
            meeting_type: m.meeting_type.clone(),
            meeting_date: m
                .meeting_date
                .naive_utc()
                .format(MEETING_DATE_INPUT_FORMAT)
                .to_string(),
            notes: m.notes.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        validate_meeting_fields(&self.location, &self.meeting_type, &self.notes)
    }

    /// The meeting date as UTC, or `None` when the input is malformed.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.meeting_date, MEETING_DATE_INPUT_FORMAT)
            .ok()
            .map(|d| d.and_utc())
    }

    pub fn into_request(self, legal_case: i64) -> Option<CreateMeetingRequest> {
        let meeting_date = self.parsed_date()?;
        Some(CreateMeetingRequest {
            legal_case,
            name: String::new(),
            location: self.location,
            meeting_type: self.meeting_type,
            meeting_date,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 9, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    #[test]
    fn blank_draft_reports_every_missing_field() {
        let errors = MeetingDraft::new(noon()).validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["location"], "Location cannot be empty");
        assert_eq!(errors["meeting_type"], "Meeting type cannot be empty");
        assert_eq!(errors["notes"], "Note cannot be empty");
    }

    #[test]
    fn messages_clear_as_fields_are_filled() {
        let mut draft = MeetingDraft::new(noon());
        draft.location = "Soweto office".into();
        let errors = draft.validate();
        assert!(!errors.contains_key("location"));
        assert_eq!(errors.len(), 2);

        draft.meeting_type = "In person".into();
        draft.notes = "Discussed eviction notice".into();
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let errors = validate_meeting_fields("  ", "Call", "\n");
        assert!(errors.contains_key("location"));
        assert!(errors.contains_key("notes"));
        assert!(!errors.contains_key("meeting_type"));
    }

    #[test]
    fn draft_defaults_date_to_now() {
        let draft = MeetingDraft::new(noon());
        assert_eq!(draft.meeting_date, "2021-09-01T12:30");
        assert_eq!(draft.parsed_date(), Some(noon().and_utc()));
    }

    #[test]
    fn into_request_rejects_bad_date() {
        let mut draft = MeetingDraft::new(noon());
        draft.meeting_date = "yesterday".into();
        assert!(draft.into_request(1).is_none());
    }

    #[test]
    fn update_only_checks_present_fields() {
        let patch = UpdateMeetingRequest {
            notes: Some(String::new()),
            ..Default::default()
        };
        let errors = patch.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["notes"], NOTES_REQUIRED);
    }
}
