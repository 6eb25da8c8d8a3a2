use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTION_CREATE: &str = "Create";
pub const ACTION_UPDATE: &str = "Update";

pub const TARGET_LEGAL_CASE: &str = "LegalCase";
pub const TARGET_MEETING: &str = "Meeting";
pub const TARGET_LEGAL_CASE_FILE: &str = "LegalCaseFile";
pub const TARGET_CASE_UPDATE: &str = "CaseUpdate";

/// Activity feed labels keyed by `"{target_type} {action}"`.
pub const LOG_LABELS: &[(&str, &str)] = &[
    ("LegalCase Create", "Case created"),
    ("LegalCase Update", "Case update"),
    ("Meeting Create", "New meeting"),
    ("Meeting Update", "Meeting updated"),
    ("LegalCaseFile Create", "File uploaded"),
    ("LegalCaseFile Update", "File updated"),
];

/// One audit-trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Log {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub parent_id: Option<i64>,
    pub parent_type: String,
    pub target_id: Option<i64>,
    pub target_type: String,
    pub action: String,
    pub note: String,
    pub user: Option<i64>,
}

/// A single field change recorded against a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct LogChange {
    pub id: i64,
    pub log_id: i64,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewLogChange {
    pub field: String,
    pub value: String,
}

impl NewLogChange {
    pub fn new(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateLogRequest {
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub parent_type: String,
    pub target_id: Option<i64>,
    pub target_type: String,
    pub action: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub changes: Vec<NewLogChange>,
}

/// Query string for `GET /api/logs`. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct LogQuery {
    pub parent_id: Option<i64>,
    pub parent_type: Option<String>,
    pub target_id: Option<i64>,
    pub target_type: Option<String>,
}

impl LogQuery {
    /// Logs whose parent is the given legal case.
    pub fn for_legal_case(id: i64) -> Self {
        Self {
            parent_id: Some(id),
            parent_type: Some(TARGET_LEGAL_CASE.to_string()),
            ..Default::default()
        }
    }
}

/// Feed label for a log entry; unknown pairs fall back to the raw key.
pub fn log_label(target_type: &str, action: &str) -> String {
    let key = format!("{} {}", target_type, action);
    LOG_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or(key)
}

/// Case-insensitive substring filter over action, note and target type.
/// A blank query keeps every log.
pub fn filter_logs<'a>(logs: &'a [Log], query: &str) -> Vec<&'a Log> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return logs.iter().collect();
    }
    logs.iter()
        .filter(|log| {
            log.action.to_lowercase().contains(&needle)
                || log.note.to_lowercase().contains(&needle)
                || log.target_type.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Filtered logs in feed order: newest first.
pub fn visible_logs<'a>(logs: &'a [Log], query: &str) -> Vec<&'a Log> {
    let mut shown = filter_logs(logs, query);
    shown.reverse();
    shown
}

/// `"{n} Logs"` heading for the feed.
pub fn log_count_label(n: usize) -> String {
    format!("{} Logs", n)
}

/// Feed date, e.g. `Sep 01, 2021`.
pub fn format_log_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log(id: i64, target_type: &str, action: &str, note: &str) -> Log {
        Log {
            id,
            created_at: Utc.with_ymd_and_hms(2021, 9, id as u32, 10, 0, 0).unwrap(),
            parent_id: Some(1),
            parent_type: TARGET_LEGAL_CASE.into(),
            target_id: Some(id),
            target_type: target_type.into(),
            action: action.into(),
            note: note.into(),
            user: Some(2),
        }
    }

    fn sample() -> Vec<Log> {
        vec![
            log(1, "LegalCase", "Create", "Opened after walk-in"),
            log(2, "Meeting", "Create", "Landlord meeting"),
            log(3, "LegalCaseFile", "Create", "Eviction order scan"),
            log(4, "LegalCase", "Update", "State set to Closed"),
        ]
    }

    #[test]
    fn labels_cover_known_pairs() {
        assert_eq!(log_label("LegalCase", "Create"), "Case created");
        assert_eq!(log_label("LegalCase", "Update"), "Case update");
        assert_eq!(log_label("Meeting", "Create"), "New meeting");
        assert_eq!(log_label("Meeting", "Update"), "Meeting updated");
        assert_eq!(log_label("LegalCaseFile", "Create"), "File uploaded");
        assert_eq!(log_label("LegalCaseFile", "Update"), "File updated");
    }

    #[test]
    fn unknown_label_falls_back_to_key() {
        assert_eq!(log_label("CaseUpdate", "Create"), "CaseUpdate Create");
    }

    #[test]
    fn blank_filter_keeps_everything() {
        let logs = sample();
        assert_eq!(filter_logs(&logs, "").len(), 4);
        assert_eq!(filter_logs(&logs, "   ").len(), 4);
    }

    #[test]
    fn filter_narrows_by_note_action_and_target() {
        let logs = sample();
        let ids = |q: &str| filter_logs(&logs, q).iter().map(|l| l.id).collect::<Vec<_>>();
        assert_eq!(ids("landlord"), vec![2]);
        assert_eq!(ids("UPDATE"), vec![4]);
        assert_eq!(ids("legalcasefile"), vec![3]);
        assert_eq!(ids("legalcase"), vec![1, 3, 4]);
        assert!(ids("nothing matches").is_empty());
    }

    #[test]
    fn visible_logs_are_newest_first() {
        let logs = sample();
        let ids: Vec<i64> = visible_logs(&logs, "").iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(log_count_label(ids.len()), "4 Logs");
    }

    #[test]
    fn date_format() {
        let at = Utc.with_ymd_and_hms(2021, 9, 1, 8, 0, 0).unwrap();
        assert_eq!(format_log_date(&at), "Sep 01, 2021");
    }
}
