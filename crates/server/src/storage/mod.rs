mod local;

pub use local::LocalObjectStore;

use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    types::ServerSideEncryption,
    Client,
};

use shared_types::{AppError, LegalCaseFile, RecordKind};
use sqlx::{Pool, Postgres};
use std::future::Future;

use crate::config::feature_flags;
use crate::repo::case_file::NewCaseFile;

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

/// Bucket name for case files (from env or default).
fn case_files_bucket() -> String {
    std::env::var("CASE_FILES_BUCKET").unwrap_or_else(|_| "case-files".to_string())
}

/// Object key for an uploaded case file. The per-upload uuid keeps two files
/// with the same name on one case apart.
pub fn case_file_key(legal_case: i64, upload_id: uuid::Uuid, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("legal-cases/{legal_case}/{upload_id}/{safe}")
}

// ── Trait ────────────────────────────────────────────────────────────

/// Object storage operations for case files.
#[allow(async_fn_in_trait)]
pub trait ObjectStore: Send + Sync {
    /// Download object bytes.
    async fn get(&self, key: &str) -> Result<Vec<u8>, String>;

    /// Upload bytes under `key`, replacing any existing object.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), String>;
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible object store backed by RustFS/MinIO.
/// All uploads are encrypted with SSE-S3 (AES256).
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a new S3ObjectStore from environment variables.
    ///
    /// Supports both Fly/Tigris (`AWS_*`) and local MinIO (`S3_*`) naming.
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT must be set")?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY must be set")?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY must be set")?;
        let region =
            env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket: case_files_bucket(),
        })
    }

    /// Ensure the case files bucket exists (no public-read policy).
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            tracing::info!("Creating case files bucket '{}'...", self.bucket);
            match self.client.create_bucket().bucket(&self.bucket).send().await {
                Ok(_) => tracing::info!("Case files bucket '{}' created", self.bucket),
                Err(e) => tracing::warn!(
                    "Failed to create case files bucket '{}': {}",
                    self.bucket,
                    e
                ),
            }
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, String> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 GetObject failed for key '{}': {:?}", key, svc);
                format!("S3 download failed: {}", svc)
            })?;

        resp.body
            .collect()
            .await
            .map(|data| data.into_bytes().to_vec())
            .map_err(|e| format!("Failed to read S3 response body: {}", e))
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .server_side_encryption(ServerSideEncryption::Aes256)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 PutObject failed for key '{}': {:?}", key, svc);
                format!("S3 upload failed: {}", svc)
            })?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| format!("DELETE failed: {}", e))?;
        Ok(())
    }
}

// ── Backend selection ───────────────────────────────────────────────

/// The configured case file backend: S3 when the `s3` feature flag is on,
/// otherwise the local upload directory.
pub enum FileStore {
    S3(S3ObjectStore),
    Local(LocalObjectStore),
}

impl FileStore {
    pub fn from_config() -> Result<Self, String> {
        if feature_flags().s3 {
            Ok(Self::S3(S3ObjectStore::from_env()?))
        } else {
            Ok(Self::Local(LocalObjectStore::new(
                crate::config::upload_dir(),
            )))
        }
    }
}

impl ObjectStore for FileStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, String> {
        match self {
            Self::S3(s) => s.get(key).await,
            Self::Local(l) => l.get(key).await,
        }
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        match self {
            Self::S3(s) => s.put(key, content_type, body).await,
            Self::Local(l) => l.put(key, content_type, body).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        match self {
            Self::S3(s) => s.delete(key).await,
            Self::Local(l) => l.delete(key).await,
        }
    }
}

// ── Case file lifecycle ─────────────────────────────────────────────

/// A complete file ready to be written to the store.
pub struct IncomingFile {
    pub legal_case: i64,
    pub file_name: String,
    pub content_type: String,
    pub description: String,
    pub data: Vec<u8>,
}

/// Put `body` under `key`, then await `record`. A failed record deletes the
/// object again; a failed delete only logs a warning.
async fn put_then_record<S, T, F>(
    store: &S,
    key: &str,
    content_type: &str,
    body: Vec<u8>,
    record: F,
) -> Result<T, AppError>
where
    S: ObjectStore,
    F: Future<Output = Result<T, AppError>>,
{
    store
        .put(key, content_type, body)
        .await
        .map_err(AppError::internal)?;

    match record.await {
        Ok(saved) => Ok(saved),
        Err(err) => {
            if let Err(e) = store.delete(key).await {
                tracing::warn!(key, error = %e, "Orphaned case file object");
            }
            Err(err)
        }
    }
}

/// Write the bytes to the configured store, then record the file row.
pub async fn save_case_file(
    pool: &Pool<Postgres>,
    user: i64,
    file: IncomingFile,
) -> Result<LegalCaseFile, AppError> {
    if file.data.is_empty() {
        return Err(AppError::field("upload", "File is empty"));
    }
    if crate::repo::legal_case::find_by_id(pool, file.legal_case)
        .await?
        .is_none()
    {
        return Err(AppError::missing(RecordKind::LegalCase, file.legal_case));
    }

    let key = case_file_key(file.legal_case, uuid::Uuid::new_v4(), &file.file_name);
    let size = file.data.len() as i64;
    let store = FileStore::from_config().map_err(AppError::internal)?;
    let row = crate::repo::case_file::create(
        pool,
        user,
        NewCaseFile {
            legal_case: file.legal_case,
            upload_key: &key,
            file_name: &file.file_name,
            content_type: &file.content_type,
            size_bytes: size,
            description: &file.description,
        },
    );
    let saved = put_then_record(&store, &key, &file.content_type, file.data, row).await?;

    tracing::info!(file_id = saved.id, legal_case = saved.legal_case, size, "Case file stored");
    Ok(saved)
}

/// Delete the row, then the stored object. Returns false when no row matched.
/// A storage failure after the row is gone only logs a warning.
pub async fn remove_case_file(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let Some(row) = crate::repo::case_file::delete(pool, id).await? else {
        return Ok(false);
    };

    let store = FileStore::from_config().map_err(AppError::internal)?;
    if let Err(e) = store.delete(&row.upload_key).await {
        tracing::warn!(file_id = id, key = %row.upload_key, error = %e, "Orphaned case file object");
    }
    Ok(true)
}
