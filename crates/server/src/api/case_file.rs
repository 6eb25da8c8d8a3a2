use dioxus::prelude::*;
use shared_types::{
    BeginUploadRequest, ChunkReceipt, LegalCaseFile, UpdateLegalCaseFileRequest, UploadTicket,
};

// ── Case File Server Functions ─────────────────────────

#[server]
pub async fn list_case_files(legal_case: i64) -> Result<Vec<LegalCaseFile>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::case_file::list(get_db().await, Some(legal_case))
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Change the description a file is listed under.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn rename_case_file(id: i64, description: String) -> Result<LegalCaseFile, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    let claims = super::auth::require_auth()?;
    crate::repo::case_file::update(
        get_db().await,
        claims.sub,
        id,
        UpdateLegalCaseFileRequest {
            description: Some(description),
        },
    )
    .await
    .map_err(|e| e.into_server_fn_error())?
    .ok_or_else(|| AppError::missing(RecordKind::CaseFile, id).into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_case_file(id: i64) -> Result<(), ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    let removed = crate::storage::remove_case_file(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    if !removed {
        return Err(AppError::missing(RecordKind::CaseFile, id).into_server_fn_error());
    }
    Ok(())
}

// ── Chunked upload ─────────────────────────────────────
//
// begin_upload → upload_chunk (repeated, in order) → finish_upload.
// Chunks travel base64-encoded since server function bodies are JSON.

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn begin_upload(body: BeginUploadRequest) -> Result<UploadTicket, ServerFnError> {
    use crate::error_convert::AppErrorExt;
    use crate::upload_staging::upload_staging;

    let claims = super::auth::require_auth()?;
    let id = upload_staging()
        .begin(claims.sub, body)
        .map_err(|e| e.into_server_fn_error())?;
    Ok(UploadTicket {
        upload_id: id.to_string(),
        chunk_size: shared_types::UPLOAD_CHUNK_SIZE,
    })
}

#[server]
pub async fn upload_chunk(
    upload_id: String,
    offset: u64,
    data: String,
) -> Result<ChunkReceipt, ServerFnError> {
    use crate::error_convert::AppErrorExt;
    use crate::upload_staging::upload_staging;
    use base64::Engine;
    use shared_types::AppError;

    let claims = super::auth::require_auth()?;
    let id = uuid::Uuid::parse_str(&upload_id)
        .map_err(|_| AppError::bad_request("Invalid upload id").into_server_fn_error())?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&data)
        .map_err(|e| {
            AppError::bad_request(format!("Invalid chunk data: {e}")).into_server_fn_error()
        })?;

    upload_staging()
        .append(claims.sub, id, offset, &bytes)
        .map_err(|e| e.into_server_fn_error())
}

/// Commit a fully received upload to storage and record the file.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn finish_upload(upload_id: String) -> Result<LegalCaseFile, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use crate::storage::{save_case_file, IncomingFile};
    use crate::upload_staging::upload_staging;
    use shared_types::AppError;

    let claims = super::auth::require_auth()?;
    let id = uuid::Uuid::parse_str(&upload_id)
        .map_err(|_| AppError::bad_request("Invalid upload id").into_server_fn_error())?;
    let staged = upload_staging()
        .finish(claims.sub, id)
        .map_err(|e| e.into_server_fn_error())?;

    save_case_file(
        get_db().await,
        claims.sub,
        IncomingFile {
            legal_case: staged.legal_case,
            file_name: staged.file_name,
            content_type: staged.content_type,
            description: staged.description,
            data: staged.data,
        },
    )
    .await
    .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn cancel_upload(upload_id: String) -> Result<(), ServerFnError> {
    use crate::upload_staging::upload_staging;

    let claims = super::auth::require_auth()?;
    if let Ok(id) = uuid::Uuid::parse_str(&upload_id) {
        upload_staging().cancel(claims.sub, id);
    }
    Ok(())
}
