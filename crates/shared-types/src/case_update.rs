use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::meeting::validate_meeting_fields;

/// Milliseconds a case update notification stays on screen.
pub const NOTICE_DURATION_MS: u64 = 6000;

pub const FILE_UPLOAD_FAILED: &str = "File upload failed";

// ── Request payloads ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MeetingUpdate {
    pub meeting_type: String,
    pub location: String,
    pub notes: String,
    pub meeting_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<i64>,
}

/// Body of `POST /api/case-updates`. Exactly one of `note`, `meeting` or
/// `files` must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseUpdateRequest {
    pub legal_case: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting: Option<MeetingUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<i64>>,
}

/// The validated shape of a [`CaseUpdateRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaseUpdateKind {
    Note(NoteUpdate),
    Meeting(MeetingUpdate),
    Files(Vec<i64>),
}

impl CaseUpdateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseUpdateKind::Note(_) => "note",
            CaseUpdateKind::Meeting(_) => "meeting",
            CaseUpdateKind::Files(_) => "files",
        }
    }

    /// File ids attached to the update, in submission order.
    pub fn files(&self) -> Vec<i64> {
        match self {
            CaseUpdateKind::Note(n) => n.file.into_iter().collect(),
            CaseUpdateKind::Meeting(m) => m.file.into_iter().collect(),
            CaseUpdateKind::Files(ids) => ids.clone(),
        }
    }
}

impl CaseUpdateRequest {
    pub fn note(legal_case: i64, note: NoteUpdate) -> Self {
        Self {
            legal_case,
            note: Some(note),
            ..Default::default()
        }
    }

    pub fn meeting(legal_case: i64, meeting: MeetingUpdate) -> Self {
        Self {
            legal_case,
            meeting: Some(meeting),
            ..Default::default()
        }
    }

    pub fn files(legal_case: i64, files: Vec<i64>) -> Self {
        Self {
            legal_case,
            files: Some(files),
            ..Default::default()
        }
    }

    /// Check the payload and collapse it into a [`CaseUpdateKind`].
    pub fn into_kind(self) -> Result<CaseUpdateKind, AppError> {
        match (self.note, self.meeting, self.files) {
            (Some(note), None, None) => {
                if note.title.trim().is_empty() && note.content.trim().is_empty() {
                    return Err(AppError::field("content", "Note cannot be empty"));
                }
                Ok(CaseUpdateKind::Note(note))
            }
            (None, Some(meeting), None) => {
                let errors =
                    validate_meeting_fields(&meeting.location, &meeting.meeting_type, &meeting.notes);
                if !errors.is_empty() {
                    return Err(AppError::validation("Validation failed", errors));
                }
                Ok(CaseUpdateKind::Meeting(meeting))
            }
            (None, None, Some(files)) => {
                if files.is_empty() {
                    return Err(AppError::field("files", "Select at least one file"));
                }
                Ok(CaseUpdateKind::Files(files))
            }
            _ => Err(AppError::bad_request(
                "A case update needs exactly one of note, meeting or files",
            )),
        }
    }
}

// ── Stored updates ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseUpdateRow {
    pub id: i64,
    pub legal_case_id: i64,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub meeting_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A case update as listed on the case page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseUpdate {
    pub id: i64,
    pub legal_case: i64,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub meeting: Option<i64>,
    #[serde(default)]
    pub files: Vec<i64>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl CaseUpdate {
    pub fn from_row(row: CaseUpdateRow, files: Vec<i64>) -> Self {
        Self {
            id: row.id,
            legal_case: row.legal_case_id,
            kind: row.kind,
            title: row.title,
            content: row.content,
            meeting: row.meeting_id,
            files,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Query string for `GET /api/case-updates`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CaseUpdateQuery {
    pub legal_case: Option<i64>,
}

// ── UI tabs ─────────────────────────────────────────────────────────

/// The three tabs of the case update dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTab {
    Note,
    Meeting,
    File,
}

impl UpdateTab {
    pub const ALL: [UpdateTab; 3] = [UpdateTab::Note, UpdateTab::Meeting, UpdateTab::File];

    pub fn value(&self) -> &'static str {
        match self {
            UpdateTab::Note => "note",
            UpdateTab::Meeting => "meeting",
            UpdateTab::File => "file",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            UpdateTab::Note => "Note",
            UpdateTab::Meeting => "Meeting",
            UpdateTab::File => "File",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            UpdateTab::Note => "Note update successful",
            UpdateTab::Meeting => "Meeting update successful",
            UpdateTab::File => "File update successful",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            UpdateTab::Note => "Note update failed",
            UpdateTab::Meeting => "Meeting update failed",
            UpdateTab::File => "File update failed",
        }
    }
}
