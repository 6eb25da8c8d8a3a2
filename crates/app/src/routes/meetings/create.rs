use dioxus::prelude::*;
use shared_types::{AppError, MeetingDraft, FILE_UPLOAD_FAILED};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, Form, FormActions, PageHeader, PageSubtitle,
    PageTitle, UploadProgress,
};
use shared_ui::{use_toast, ToastOptions};

use crate::components::meeting_form::{visible_errors, MeetingForm};
use crate::components::upload::{pick_file, upload_case_file, FileAttachment, PickedFile};
use crate::format_helpers::error_message;
use crate::routes::Route;

/// Record a meeting against a case, optionally attaching a file.
#[component]
pub fn MeetingCreatePage(legal_case: i64) -> Element {
    let toast = use_toast();
    let draft = use_signal(|| MeetingDraft::new(chrono::Local::now().naive_local()));
    let mut submitted = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut picked = use_signal(|| Option::<PickedFile>::None);
    let file_description = use_signal(String::new);
    let progress = use_signal(|| 0u8);

    let case = use_resource(move || async move { server::api::get_legal_case(legal_case).await.ok() });

    let on_file = move |evt: FormEvent| async move {
        match pick_file(&evt).await {
            Ok(file) => picked.set(file),
            Err(e) => toast.error(e, ToastOptions::new()),
        }
    };

    let handle_save = move |_: FormEvent| {
        submitted.set(true);
        let current = draft.read().clone();
        if !visible_errors(&current, true).is_empty() {
            return;
        }
        let Some(body) = current.into_request(legal_case) else {
            return;
        };
        let pending = picked.read().clone();
        let description = file_description.read().trim().to_string();

        spawn(async move {
            saving.set(true);
            match server::api::create_meeting(body).await {
                Ok(_) => {
                    if let Some(file) = pending {
                        if let Err(e) = upload_case_file(legal_case, file, description, progress).await {
                            tracing::warn!(legal_case, error = %e, "meeting attachment upload failed");
                            toast.error(FILE_UPLOAD_FAILED.to_string(), ToastOptions::new());
                        }
                    }
                    toast.success("Meeting saved".to_string(), ToastOptions::new());
                    navigator().push(Route::CaseDetail { id: legal_case });
                }
                Err(e) => {
                    let fe = AppError::parse_field_errors(&e.to_string());
                    let msg = fe
                        .values()
                        .next()
                        .cloned()
                        .unwrap_or_else(|| error_message(&e));
                    toast.error(msg, ToastOptions::new());
                }
            }
            saving.set(false);
        });
    };

    let case_number = case
        .read()
        .as_ref()
        .and_then(|c| c.as_ref().map(|c| c.case_number.clone()))
        .unwrap_or_default();
    let picked_name = picked.read().as_ref().map(|p| p.name.clone());

    rsx! {
        div { class: "container narrow",
            PageHeader {
                div {
                    PageTitle { "New meeting" }
                    if !case_number.is_empty() {
                        PageSubtitle { "{case_number}" }
                    }
                }
            }
            UploadProgress { percent: progress(), label: "Uploading attachment" }
            Card {
                CardContent {
                    Form { onsubmit: handle_save,
                        MeetingForm { draft, submitted, read_only: saving() }
                        FileAttachment {
                            description: file_description,
                            on_file: on_file,
                            file_name: picked_name,
                            disabled: saving(),
                        }
                        FormActions {
                            Link { to: Route::CaseDetail { id: legal_case },
                                Button { variant: ButtonVariant::Ghost, "Cancel" }
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                loading: saving(),
                                "Save meeting"
                            }
                        }
                    }
                }
            }
        }
    }
}
