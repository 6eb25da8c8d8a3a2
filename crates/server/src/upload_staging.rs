use shared_types::{AppError, BeginUploadRequest, ChunkReceipt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::max_upload_bytes;

/// Sessions untouched for this long are dropped on the next call.
const STALE_AFTER: Duration = Duration::from_secs(30 * 60);

/// Open sessions one officer may hold at a time.
pub const MAX_SESSIONS_PER_OWNER: usize = 4;

/// A chunked upload in progress. Bytes accumulate in memory until `finish`.
#[derive(Debug)]
pub struct StagedUpload {
    pub owner: i64,
    pub legal_case: i64,
    pub file_name: String,
    pub content_type: String,
    pub description: String,
    pub total_size: u64,
    pub data: Vec<u8>,
    touched: Instant,
}

/// Upload sessions keyed by id, shared across server function calls.
#[derive(Clone)]
pub struct UploadStaging {
    inner: Arc<Mutex<HashMap<Uuid, StagedUpload>>>,
    max_bytes: u64,
    stale_after: Duration,
}

fn purge_stale(sessions: &mut HashMap<Uuid, StagedUpload>, stale_after: Duration) {
    let before = sessions.len();
    sessions.retain(|_, s| s.touched.elapsed() < stale_after);
    let dropped = before - sessions.len();
    if dropped > 0 {
        tracing::info!(dropped, "Dropped stale upload sessions");
    }
}

impl UploadStaging {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_bytes,
            stale_after: STALE_AFTER,
        }
    }

    /// Open a session for `owner`. Rejects empty and oversized files, and
    /// owners already holding [`MAX_SESSIONS_PER_OWNER`] sessions.
    pub fn begin(&self, owner: i64, req: BeginUploadRequest) -> Result<Uuid, AppError> {
        if req.file_name.trim().is_empty() {
            return Err(AppError::field("file_name", "File name cannot be empty"));
        }
        if req.total_size == 0 {
            return Err(AppError::field("file", "File is empty"));
        }
        if req.total_size > self.max_bytes {
            return Err(AppError::field(
                "file",
                format!("File exceeds the {} MB limit", self.max_bytes / (1024 * 1024)),
            ));
        }

        let mut inner = self.inner.lock().unwrap();
        purge_stale(&mut inner, self.stale_after);
        if inner.values().filter(|s| s.owner == owner).count() >= MAX_SESSIONS_PER_OWNER {
            return Err(AppError::conflict(format!(
                "Too many uploads in progress, finish or cancel one first (limit {MAX_SESSIONS_PER_OWNER})"
            )));
        }

        let id = Uuid::new_v4();
        inner.insert(
            id,
            StagedUpload {
                owner,
                legal_case: req.legal_case,
                file_name: req.file_name,
                content_type: req.content_type,
                description: req.description,
                total_size: req.total_size,
                data: Vec::new(),
                touched: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Append `bytes` at `offset`. Chunks must arrive in order.
    pub fn append(
        &self,
        owner: i64,
        id: Uuid,
        offset: u64,
        bytes: &[u8],
    ) -> Result<ChunkReceipt, AppError> {
        let mut inner = self.inner.lock().unwrap();
        purge_stale(&mut inner, self.stale_after);
        let session = inner
            .get_mut(&id)
            .filter(|s| s.owner == owner)
            .ok_or_else(|| AppError::not_found("Upload session not found"))?;

        let received = session.data.len() as u64;
        if offset != received {
            return Err(AppError::bad_request(format!(
                "Expected chunk at offset {received}, got {offset}"
            )));
        }
        if received + bytes.len() as u64 > session.total_size {
            return Err(AppError::bad_request("Chunk runs past the declared file size"));
        }

        session.data.extend_from_slice(bytes);
        session.touched = Instant::now();
        Ok(ChunkReceipt {
            received: session.data.len() as u64,
            total: session.total_size,
        })
    }

    /// Close a complete session and hand back its bytes.
    pub fn finish(&self, owner: i64, id: Uuid) -> Result<StagedUpload, AppError> {
        let mut inner = self.inner.lock().unwrap();
        purge_stale(&mut inner, self.stale_after);
        match inner.get(&id) {
            Some(s) if s.owner == owner => {
                if (s.data.len() as u64) < s.total_size {
                    return Err(AppError::bad_request(format!(
                        "Upload incomplete: {} of {} bytes received",
                        s.data.len(),
                        s.total_size
                    )));
                }
            }
            _ => return Err(AppError::not_found("Upload session not found")),
        }
        inner
            .remove(&id)
            .ok_or_else(|| AppError::not_found("Upload session not found"))
    }

    /// Sessions currently open, stale ones included until the next call.
    pub fn open_sessions(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Drop a session without storing anything.
    pub fn cancel(&self, owner: i64, id: Uuid) {
        let mut inner = self.inner.lock().unwrap();
        if inner.get(&id).is_some_and(|s| s.owner == owner) {
            inner.remove(&id);
        }
    }
}

/// Process-wide staging area used by the upload server functions.
pub fn upload_staging() -> &'static UploadStaging {
    static STAGING: OnceLock<UploadStaging> = OnceLock::new();
    STAGING.get_or_init(|| UploadStaging::new(max_upload_bytes() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(size: u64) -> BeginUploadRequest {
        BeginUploadRequest {
            legal_case: 4,
            file_name: "affidavit.pdf".into(),
            content_type: "application/pdf".into(),
            total_size: size,
            description: String::new(),
        }
    }

    #[test]
    fn chunks_accumulate_until_finish() {
        let staging = UploadStaging::new(1024);
        let id = staging.begin(1, request(6)).unwrap();

        let r = staging.append(1, id, 0, b"abc").unwrap();
        assert_eq!(r.percent(), 50);
        let r = staging.append(1, id, 3, b"def").unwrap();
        assert_eq!(r.percent(), 100);

        let done = staging.finish(1, id).unwrap();
        assert_eq!(done.data, b"abcdef");
        assert_eq!(done.legal_case, 4);
        // session is gone once finished
        assert!(staging.finish(1, id).is_err());
    }

    #[test]
    fn rejects_oversized_and_empty_files() {
        let staging = UploadStaging::new(10);
        let err = staging.begin(1, request(11)).unwrap_err();
        assert!(err.field_errors.contains_key("file"));
        assert!(staging.begin(1, request(0)).is_err());
    }

    #[test]
    fn out_of_order_chunk_is_rejected() {
        let staging = UploadStaging::new(100);
        let id = staging.begin(1, request(6)).unwrap();
        assert!(staging.append(1, id, 3, b"def").is_err());
        assert!(staging.append(1, id, 0, b"abcdefg").is_err());
    }

    #[test]
    fn incomplete_upload_cannot_finish() {
        let staging = UploadStaging::new(100);
        let id = staging.begin(1, request(6)).unwrap();
        staging.append(1, id, 0, b"abc").unwrap();
        assert!(staging.finish(1, id).is_err());
        staging.cancel(1, id);
        assert!(staging.append(1, id, 3, b"def").is_err());
        assert_eq!(staging.open_sessions(), 0);
    }

    #[test]
    fn sessions_belong_to_their_owner() {
        let staging = UploadStaging::new(100);
        let id = staging.begin(1, request(3)).unwrap();
        assert!(staging.append(2, id, 0, b"abc").is_err());
        staging.cancel(2, id);
        assert!(staging.append(1, id, 0, b"abc").is_ok());
    }

    #[test]
    fn owner_session_count_is_capped() {
        let staging = UploadStaging::new(100);
        let ids: Vec<Uuid> = (0..MAX_SESSIONS_PER_OWNER)
            .map(|_| staging.begin(1, request(3)).unwrap())
            .collect();

        let err = staging.begin(1, request(3)).unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::Conflict);
        // other officers are unaffected
        assert!(staging.begin(2, request(3)).is_ok());

        staging.cancel(1, ids[0]);
        assert!(staging.begin(1, request(3)).is_ok());
        assert_eq!(staging.open_sessions(), MAX_SESSIONS_PER_OWNER + 1);
    }

    #[test]
    fn stale_sessions_are_dropped_on_append_and_finish() {
        let staging = UploadStaging {
            stale_after: Duration::ZERO,
            ..UploadStaging::new(100)
        };
        let id = staging.begin(1, request(3)).unwrap();
        let err = staging.append(1, id, 0, b"abc").unwrap_err();
        assert_eq!(err.kind, shared_types::AppErrorKind::NotFound);
        assert_eq!(staging.open_sessions(), 0);

        let id = staging.begin(1, request(3)).unwrap();
        assert!(staging.finish(1, id).is_err());
        assert_eq!(staging.open_sessions(), 0);
    }
}
