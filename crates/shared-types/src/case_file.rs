use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest file label shown before it is shortened.
pub const MAX_DISPLAY_NAME: usize = 28;

/// Documents every case file should eventually contain. Shown beside the
/// upload form as a checklist.
pub const RECOMMENDED_FILES: &[&str] = &[
    "Notice to vacate",
    "Notice of motion",
    "Eviction order",
    "Proof of rental payment",
    "Lease agreement",
    "Record of attempt to find legal council",
];

// ── DB row struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct LegalCaseFileRow {
    pub id: i64,
    pub legal_case_id: i64,
    pub upload_key: String,
    pub upload_file_name: String,
    pub upload_file_extension: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── API types ───────────────────────────────────────────────────────

/// A document attached to a legal case. `upload` is the download URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LegalCaseFile {
    pub id: i64,
    pub legal_case: i64,
    pub upload: String,
    pub upload_file_name: String,
    pub upload_file_extension: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LegalCaseFileRow> for LegalCaseFile {
    fn from(r: LegalCaseFileRow) -> Self {
        Self {
            upload: download_url(r.id),
            id: r.id,
            legal_case: r.legal_case_id,
            upload_file_name: r.upload_file_name,
            upload_file_extension: r.upload_file_extension,
            content_type: r.content_type,
            size_bytes: r.size_bytes,
            description: r.description,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl LegalCaseFile {
    /// Label used in file lists.
    pub fn display_name(&self) -> String {
        display_file_name(&self.description, &self.upload_file_name)
    }
}

/// Only the description is editable once a file is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateLegalCaseFileRequest {
    pub description: Option<String>,
}

/// Query string for `GET /api/legal-case-files`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct LegalCaseFileQuery {
    pub legal_case: Option<i64>,
}

pub fn download_url(id: i64) -> String {
    format!("/api/legal-case-files/{}/download", id)
}

/// The description when non-blank, else the file name; anything longer
/// than [`MAX_DISPLAY_NAME`] characters is cut to 26 plus `"..."`.
pub fn display_file_name(description: &str, file_name: &str) -> String {
    let name = if description.trim().is_empty() {
        file_name
    } else {
        description
    };
    if name.chars().count() > MAX_DISPLAY_NAME {
        let head: String = name.chars().take(MAX_DISPLAY_NAME - 2).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Split `lease.final.pdf` into `("lease.final", "pdf")`. Names without a
/// dot, or with only a leading dot, have no extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            (&file_name[..idx], &file_name[idx + 1..])
        }
        _ => (file_name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_description_over_file_name() {
        assert_eq!(display_file_name("Lease", "scan_001.pdf"), "Lease");
        assert_eq!(display_file_name("", "scan_001.pdf"), "scan_001.pdf");
        assert_eq!(display_file_name("   ", "scan_001.pdf"), "scan_001.pdf");
    }

    #[test]
    fn long_names_are_shortened() {
        let exactly = "a".repeat(28);
        assert_eq!(display_file_name(&exactly, ""), exactly);

        let long = "Record of attempt to find legal council";
        let shown = display_file_name(long, "x.pdf");
        assert_eq!(shown, "Record of attempt to find ...");
        assert_eq!(shown.chars().count(), 29);
    }

    #[test]
    fn shortening_respects_char_boundaries() {
        let name = "é".repeat(30);
        let shown = display_file_name("", &name);
        assert!(shown.starts_with(&"é".repeat(26)));
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn extensions() {
        assert_eq!(split_extension("lease.final.pdf"), ("lease.final", "pdf"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("trailing."), ("trailing.", ""));
    }

    #[test]
    fn row_conversion_builds_download_url() {
        let now = Utc::now();
        let file: LegalCaseFile = LegalCaseFileRow {
            id: 12,
            legal_case_id: 3,
            upload_key: "legal-cases/3/abc/lease.pdf".into(),
            upload_file_name: "lease.pdf".into(),
            upload_file_extension: "pdf".into(),
            content_type: "application/pdf".into(),
            size_bytes: 2048,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
        .into();
        assert_eq!(file.upload, "/api/legal-case-files/12/download");
        assert_eq!(file.legal_case, 3);
        assert_eq!(file.display_name(), "lease.pdf");
    }
}
