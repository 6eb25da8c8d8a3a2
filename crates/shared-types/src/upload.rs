use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Bytes sent per `upload_chunk` call.
pub const UPLOAD_CHUNK_SIZE: usize = 256 * 1024;

/// Milliseconds a finished progress bar stays at 100 before resetting.
pub const PROGRESS_RESET_MS: u64 = 1000;

/// Percentage of an upload completed, floored and capped at 100.
pub fn upload_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = loaded.saturating_mul(100) / total;
    pct.min(100) as u8
}

/// Byte ranges covering `total` bytes in `chunk_size` pieces.
pub fn chunk_ranges(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    if chunk_size == 0 {
        return vec![0..total];
    }
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}

/// Request to open an upload session for a legal case file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginUploadRequest {
    pub legal_case: i64,
    pub file_name: String,
    pub content_type: String,
    pub total_size: u64,
    #[serde(default)]
    pub description: String,
}

/// Handle returned when an upload session opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTicket {
    pub upload_id: String,
    pub chunk_size: usize,
}

/// Bytes the server holds for an upload session after a chunk lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkReceipt {
    pub received: u64,
    pub total: u64,
}

impl ChunkReceipt {
    pub fn percent(&self) -> u8 {
        upload_percent(self.received, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_floored() {
        assert_eq!(upload_percent(0, 300), 0);
        assert_eq!(upload_percent(1, 3), 33);
        assert_eq!(upload_percent(2, 3), 66);
        assert_eq!(upload_percent(299, 300), 99);
        assert_eq!(upload_percent(300, 300), 100);
    }

    #[test]
    fn percent_handles_degenerate_totals() {
        assert_eq!(upload_percent(10, 0), 0);
        assert_eq!(upload_percent(500, 300), 100);
    }

    #[test]
    fn chunks_cover_the_whole_file() {
        assert_eq!(chunk_ranges(10, 4), vec![0..4, 4..8, 8..10]);
        assert_eq!(chunk_ranges(8, 4), vec![0..4, 4..8]);
        assert!(chunk_ranges(0, 4).is_empty());
    }

    #[test]
    fn progress_reaches_one_hundred_on_last_chunk() {
        let total = 10u64;
        let seen: Vec<u8> = chunk_ranges(total as usize, 4)
            .into_iter()
            .map(|r| upload_percent(r.end as u64, total))
            .collect();
        assert_eq!(seen, vec![40, 80, 100]);
    }
}
