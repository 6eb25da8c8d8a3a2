//! Shared formatting utilities for the UI layer.

use chrono::{DateTime, Utc};

/// "Mar 5, 2024 9:35 PM"
pub fn format_datetime_human(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// "Mar 5, 2024"
pub fn format_date_human(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// File sizes as B / KB / MB with one decimal above bytes.
pub fn format_bytes(size: i64) -> String {
    const KB: f64 = 1024.0;
    let size = size.max(0) as f64;
    if size < KB {
        format!("{} B", size as i64)
    } else if size < KB * KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / (KB * KB))
    }
}

/// Guess a MIME type from the file extension when the browser gives none.
pub fn mime_from_filename(name: &str) -> String {
    let (_, ext) = shared_types::split_extension(name);
    match ext.to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Comma-separated names for a list of ids, skipping ids with no match.
pub fn names_for<'a>(ids: &[i64], lookup: impl Fn(i64) -> Option<&'a str>) -> String {
    let names: Vec<&str> = ids.iter().filter_map(|id| lookup(*id)).collect();
    names.join(", ")
}

/// User-facing text for a failed server call.
pub fn error_message(err: &impl std::fmt::Display) -> String {
    shared_types::AppError::friendly_message(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn human_dates() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 21, 35, 0).unwrap();
        assert_eq!(format_date_human(&at), "Mar 5, 2024");
        assert_eq!(format_datetime_human(&at), "Mar 5, 2024 9:35 PM");
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(-1), "0 B");
    }

    #[test]
    fn mime_guesses() {
        assert_eq!(mime_from_filename("Lease.PDF"), "application/pdf");
        assert_eq!(mime_from_filename("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_from_filename("README"), "application/octet-stream");
    }

    #[test]
    fn names_skip_unknown_ids() {
        let offices = [(1, "Cape Town"), (2, "Durban")];
        let lookup = |id| offices.iter().find(|(i, _)| *i == id).map(|(_, n)| *n);
        assert_eq!(names_for(&[2, 9, 1], lookup), "Durban, Cape Town");
    }
}
