use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shared_types::{
    AppError, LegalCaseFile, LegalCaseFileQuery, RecordKind, UpdateLegalCaseFileRequest,
};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use crate::storage::{remove_case_file, save_case_file, FileStore, IncomingFile, ObjectStore};

fn store() -> Result<FileStore, AppError> {
    FileStore::from_config().map_err(AppError::internal)
}

#[utoipa::path(
    get,
    path = "/api/legal-case-files",
    params(LegalCaseFileQuery),
    responses(
        (status = 200, description = "Case files, oldest first", body = Vec<LegalCaseFile>)
    ),
    tag = "legal-case-files"
)]
pub async fn list_case_files(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<LegalCaseFileQuery>,
) -> Result<Json<Vec<LegalCaseFile>>, AppError> {
    Ok(Json(crate::repo::case_file::list(&pool, params.legal_case).await?))
}

/// Upload a file as `multipart/form-data` with fields `legal_case`,
/// optional `description`, and `upload` (the file).
#[utoipa::path(
    post,
    path = "/api/legal-case-files",
    request_body(content_type = "multipart/form-data", description = "legal_case, description, upload"),
    responses(
        (status = 201, description = "File stored", body = LegalCaseFile),
        (status = 422, description = "Missing case or file", body = AppError)
    ),
    tag = "legal-case-files"
)]
#[tracing::instrument(skip(pool, auth, multipart))]
pub async fn upload_case_file(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<LegalCaseFile>), AppError> {
    let mut legal_case: Option<i64> = None;
    let mut description = String::new();
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "legal_case" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
                legal_case = Some(text.trim().parse().map_err(|_| {
                    AppError::field("legal_case", "Legal case must be a number")
                })?);
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
            }
            "upload" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
                upload = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let legal_case =
        legal_case.ok_or_else(|| AppError::field("legal_case", "Legal case is required"))?;
    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::field("upload", "No file provided"))?;

    let file = save_case_file(
        &pool,
        auth.0.sub,
        IncomingFile {
            legal_case,
            file_name,
            content_type,
            description,
            data,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

#[utoipa::path(
    get,
    path = "/api/legal-case-files/{id}",
    params(("id" = i64, Path, description = "Case file ID")),
    responses(
        (status = 200, description = "Case file found", body = LegalCaseFile),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "legal-case-files"
)]
pub async fn get_case_file(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<LegalCaseFile>, AppError> {
    crate::repo::case_file::find_row(&pool, id)
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| AppError::missing(RecordKind::CaseFile, id))
}

/// Rename a file by changing its description.
#[utoipa::path(
    patch,
    path = "/api/legal-case-files/{id}",
    params(("id" = i64, Path, description = "Case file ID")),
    request_body = UpdateLegalCaseFileRequest,
    responses(
        (status = 200, description = "Case file updated", body = LegalCaseFile),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "legal-case-files"
)]
pub async fn update_case_file(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateLegalCaseFileRequest>,
) -> Result<Json<LegalCaseFile>, AppError> {
    crate::repo::case_file::update(&pool, auth.0.sub, id, body)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::missing(RecordKind::CaseFile, id))
}

#[utoipa::path(
    delete,
    path = "/api/legal-case-files/{id}",
    params(("id" = i64, Path, description = "Case file ID")),
    responses(
        (status = 204, description = "Case file deleted"),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "legal-case-files"
)]
pub async fn delete_case_file(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if remove_case_file(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::missing(RecordKind::CaseFile, id))
    }
}

#[utoipa::path(
    get,
    path = "/api/legal-case-files/{id}/download",
    params(("id" = i64, Path, description = "Case file ID")),
    responses(
        (status = 200, description = "File bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Case file not found", body = AppError)
    ),
    tag = "legal-case-files"
)]
pub async fn download_case_file(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let row = crate::repo::case_file::find_row(&pool, id)
        .await?
        .ok_or_else(|| AppError::missing(RecordKind::CaseFile, id))?;

    let bytes = store()?.get(&row.upload_key).await.map_err(|e| {
        tracing::error!(file_id = id, error = %e, "Case file object missing");
        AppError::not_found("File content is not available")
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        row.upload_file_name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, row.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
