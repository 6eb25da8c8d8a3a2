use base64::Engine;
use dioxus::prelude::*;
use shared_types::{chunk_ranges, BeginUploadRequest, LegalCaseFile, PROGRESS_RESET_MS, RECOMMENDED_FILES};

use crate::format_helpers::mime_from_filename;
use crate::timing::{sleep_ms, Expiring};

/// A file chosen in an `<input type="file">`, read fully into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Read the first file selected in `evt`. `Ok(None)` when the selection
/// was cleared.
pub async fn pick_file(evt: &FormEvent) -> Result<Option<PickedFile>, String> {
    let files = evt.files();
    let Some(file) = files.first() else {
        return Ok(None);
    };

    let name = file.name();
    let content_type = file
        .content_type()
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| mime_from_filename(&name));
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| format!("Failed to read {name}: {e}"))?;

    Ok(Some(PickedFile {
        name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// Percent shown by an upload bar driven by [`upload_case_file`].
pub fn progress_percent(progress: &Signal<Expiring<u8>>) -> u8 {
    progress.read().get().copied().unwrap_or(0)
}

/// Push `file` to the server in `chunk_size` pieces, reporting progress
/// through `progress`. The session is cancelled if any chunk fails, and a
/// finished bar drops back to zero unless another upload has started.
pub async fn upload_case_file(
    legal_case: i64,
    file: PickedFile,
    description: String,
    mut progress: Signal<Expiring<u8>>,
) -> Result<LegalCaseFile, ServerFnError> {
    let total = file.bytes.len();
    let ticket = server::api::begin_upload(BeginUploadRequest {
        legal_case,
        file_name: file.name,
        content_type: file.content_type,
        total_size: total as u64,
        description,
    })
    .await?;

    let mut shown = progress.write().set(0);
    for range in chunk_ranges(total, ticket.chunk_size) {
        let offset = range.start as u64;
        let data = base64::engine::general_purpose::STANDARD.encode(&file.bytes[range]);
        match server::api::upload_chunk(ticket.upload_id.clone(), offset, data).await {
            Ok(receipt) => shown = progress.write().set(receipt.percent()),
            Err(e) => {
                tracing::warn!(upload_id = %ticket.upload_id, error = %e, "chunk upload failed");
                if let Err(cancel) = server::api::cancel_upload(ticket.upload_id.clone()).await {
                    tracing::warn!(
                        upload_id = %ticket.upload_id,
                        error = %cancel,
                        "cancelling failed upload"
                    );
                }
                progress.write().expire(shown);
                return Err(e);
            }
        }
    }

    let saved = server::api::finish_upload(ticket.upload_id).await;
    spawn(async move {
        sleep_ms(PROGRESS_RESET_MS).await;
        if progress.peek().is_current(shown) {
            progress.write().expire(shown);
        }
    });
    saved
}

/// File input with a description field. The description suggests the
/// usual intake documents.
#[component]
pub fn FileAttachment(
    mut description: Signal<String>,
    on_file: EventHandler<FormEvent>,
    #[props(default)] file_name: Option<String>,
    #[props(default)] error: String,
    #[props(default)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "file-attachment",
            label { class: "input-label", "File" }
            input {
                class: "file-input",
                r#type: "file",
                disabled: disabled,
                onchange: move |evt| on_file.call(evt),
            }
            if let Some(name) = file_name {
                span { class: "file-attachment-name", "{name}" }
            }
            shared_ui::FieldError { message: error }
            label { class: "input-label", r#for: "file-description", "Description" }
            input {
                id: "file-description",
                class: "input",
                value: description(),
                placeholder: "e.g. Affidavit",
                disabled: disabled,
                list: "recommended-files",
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            datalist { id: "recommended-files",
                for name in RECOMMENDED_FILES.iter() {
                    option { key: "{name}", value: *name }
                }
            }
        }
    }
}
