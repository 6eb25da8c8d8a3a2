use dioxus::prelude::*;
use shared_types::{LegalCaseFile, FILE_UPLOAD_FAILED};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ConfirmDialog,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, DialogContent, DialogRoot, DialogTitle, Form, FormActions, Input, PageActions,
    SkeletonRows, UploadProgress,
};

use crate::components::notice::{use_notice, NoticeBanner};
use crate::components::upload::{
    pick_file, progress_percent, upload_case_file, FileAttachment, PickedFile,
};
use crate::format_helpers::{format_bytes, format_date_human};
use crate::timing::Expiring;

pub const RENAME_OK: &str = "File renamed successfully";
pub const RENAME_FAILED: &str = "File rename failed";
pub const DELETE_OK: &str = "File delete successful";
pub const DELETE_FAILED: &str = "File delete failed";
pub const UPLOAD_OK: &str = "File upload successful";

/// `"{n} Case Files"` heading.
pub fn file_count_label(n: usize) -> String {
    format!("{n} Case Files")
}

/// Files in display order: newest upload first.
pub fn newest_first(files: &[LegalCaseFile]) -> Vec<&LegalCaseFile> {
    let mut sorted: Vec<&LegalCaseFile> = files.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    sorted
}

/// Upload, rename and delete the files attached to a case.
#[component]
pub fn CaseFileTab(legal_case: i64) -> Element {
    let mut notice = use_notice();
    let progress = use_signal(Expiring::<u8>::default);

    let mut show_upload = use_signal(|| false);
    let mut picked = use_signal(|| Option::<PickedFile>::None);
    let mut upload_description = use_signal(String::new);
    let mut uploading = use_signal(|| false);

    let mut renaming = use_signal(|| Option::<i64>::None);
    let mut rename_value = use_signal(String::new);
    let mut rename_busy = use_signal(|| false);

    let mut deleting = use_signal(|| Option::<i64>::None);
    let mut delete_busy = use_signal(|| false);

    let mut files = use_resource(move || async move { server::api::list_case_files(legal_case).await });

    let on_file = move |evt: FormEvent| async move {
        match pick_file(&evt).await {
            Ok(file) => picked.set(file),
            Err(e) => notice.error(e),
        }
    };

    let handle_upload = move |_: FormEvent| {
        let Some(file) = picked.read().clone() else {
            return;
        };
        let description = upload_description.read().trim().to_string();
        spawn(async move {
            uploading.set(true);
            match upload_case_file(legal_case, file, description, progress).await {
                Ok(_) => {
                    notice.success(UPLOAD_OK);
                    show_upload.set(false);
                    picked.set(None);
                    upload_description.set(String::new());
                    files.restart();
                }
                Err(e) => {
                    tracing::warn!(legal_case, error = %e, "case file upload failed");
                    notice.error(FILE_UPLOAD_FAILED);
                }
            }
            uploading.set(false);
        });
    };

    let handle_rename = move |_: FormEvent| {
        let Some(id) = renaming() else {
            return;
        };
        let description = rename_value.read().trim().to_string();
        spawn(async move {
            rename_busy.set(true);
            match server::api::rename_case_file(id, description).await {
                Ok(_) => {
                    notice.success(RENAME_OK);
                    renaming.set(None);
                    files.restart();
                }
                Err(e) => {
                    tracing::warn!(file_id = id, error = %e, "rename failed");
                    notice.error(RENAME_FAILED);
                }
            }
            rename_busy.set(false);
        });
    };

    let handle_delete = move |_: MouseEvent| {
        let Some(id) = deleting() else {
            return;
        };
        spawn(async move {
            delete_busy.set(true);
            match server::api::delete_case_file(id).await {
                Ok(()) => {
                    notice.success(DELETE_OK);
                    files.restart();
                }
                Err(e) => {
                    tracing::warn!(file_id = id, error = %e, "delete failed");
                    notice.error(DELETE_FAILED);
                }
            }
            deleting.set(None);
            delete_busy.set(false);
        });
    };

    let picked_name = picked.read().as_ref().map(|p| p.name.clone());

    rsx! {
        NoticeBanner { notice }
        UploadProgress { percent: progress_percent(&progress), label: "Uploading file" }

        Card {
            match &*files.read() {
                Some(Ok(list)) => {
                    let sorted = newest_first(list);
                    rsx! {
                        CardHeader {
                            CardTitle { "{file_count_label(list.len())}" }
                            PageActions {
                                Button {
                                    variant: ButtonVariant::Primary,
                                    onclick: move |_| {
                                        picked.set(None);
                                        upload_description.set(String::new());
                                        show_upload.set(true);
                                    },
                                    "Upload file"
                                }
                            }
                        }
                        CardContent {
                            DataTable {
                                DataTableHeader {
                                    DataTableColumn { "Name" }
                                    DataTableColumn { "Type" }
                                    DataTableColumn { "Size" }
                                    DataTableColumn { "Uploaded" }
                                    DataTableColumn { "" }
                                }
                                DataTableBody {
                                    if sorted.is_empty() {
                                        DataTableEmpty { columns: 5, message: "No files uploaded yet" }
                                    }
                                    for file in sorted {
                                        {
                                            let id = file.id;
                                            let current = file.description.clone();
                                            rsx! {
                                                DataTableRow { key: "{id}",
                                                    DataTableCell {
                                                        a { href: "{file.upload}", target: "_blank", title: "{file.upload_file_name}",
                                                            "{file.display_name()}"
                                                        }
                                                    }
                                                    DataTableCell { "{file.upload_file_extension}" }
                                                    DataTableCell { "{format_bytes(file.size_bytes)}" }
                                                    DataTableCell { "{format_date_human(&file.created_at)}" }
                                                    DataTableCell {
                                                        div { class: "row-actions",
                                                            Button {
                                                                variant: ButtonVariant::Ghost,
                                                                onclick: move |_| {
                                                                    rename_value.set(current.clone());
                                                                    renaming.set(Some(id));
                                                                },
                                                                "Rename"
                                                            }
                                                            Button {
                                                                variant: ButtonVariant::Ghost,
                                                                onclick: move |_| deleting.set(Some(id)),
                                                                "Delete"
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Some(Err(e)) => rsx! {
                    CardContent {
                        p { class: "error-text", "{crate::format_helpers::error_message(e)}" }
                    }
                },
                None => rsx! {
                    CardContent { SkeletonRows { count: 3 } }
                },
            }
        }

        DialogRoot {
            open: show_upload(),
            on_open_change: move |v| show_upload.set(v),
            DialogContent {
                DialogTitle { "Upload file" }
                Form { onsubmit: handle_upload,
                    FileAttachment {
                        description: upload_description,
                        on_file: on_file,
                        file_name: picked_name,
                        disabled: uploading(),
                    }
                    FormActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| show_upload.set(false),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            disabled: picked.read().is_none(),
                            loading: uploading(),
                            "Upload"
                        }
                    }
                }
            }
        }

        DialogRoot {
            open: renaming().is_some(),
            on_open_change: move |v: bool| {
                if !v {
                    renaming.set(None);
                }
            },
            DialogContent {
                DialogTitle { "Rename file" }
                Form { onsubmit: handle_rename,
                    Input {
                        label: "Description",
                        value: rename_value(),
                        disabled: rename_busy(),
                        on_input: move |e: FormEvent| rename_value.set(e.value()),
                    }
                    FormActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| renaming.set(None),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            loading: rename_busy(),
                            "Save"
                        }
                    }
                }
            }
        }

        ConfirmDialog {
            open: deleting().is_some(),
            on_open_change: move |v: bool| {
                if !v {
                    deleting.set(None);
                }
            },
            title: "Delete file",
            message: "The file is removed from the case and from storage.",
            busy: delete_busy(),
            on_confirm: handle_delete,
        }
    }
}
