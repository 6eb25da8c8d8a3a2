use dioxus::prelude::*;
use shared_types::{AppError, Meeting, MeetingDraft, UpdateMeetingRequest};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, Form, FormActions, PageHeader, PageTitle,
    SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::components::meeting_form::{visible_errors, MeetingForm};
use crate::format_helpers::error_message;
use crate::routes::Route;

/// Patch with the fields of `draft` that differ from `original`.
pub fn meeting_changes(draft: &MeetingDraft, original: &Meeting) -> UpdateMeetingRequest {
    let date = draft.parsed_date();
    UpdateMeetingRequest {
        name: None,
        location: (draft.location.trim() != original.location).then(|| draft.location.trim().to_string()),
        meeting_type: (draft.meeting_type.trim() != original.meeting_type)
            .then(|| draft.meeting_type.trim().to_string()),
        meeting_date: date.filter(|d| *d != original.meeting_date),
        notes: (draft.notes.trim() != original.notes).then(|| draft.notes.trim().to_string()),
    }
}

#[component]
pub fn MeetingEditPage(id: i64) -> Element {
    let toast = use_toast();
    let mut draft = use_signal(|| MeetingDraft::new(chrono::Local::now().naive_local()));
    let mut submitted = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let data = use_resource(move || async move { server::api::get_meeting(id).await });

    use_effect(move || {
        if let Some(Ok(m)) = &*data.read() {
            draft.set(MeetingDraft::from_meeting(m));
        }
    });

    let handle_save = move |_: FormEvent| {
        submitted.set(true);
        let current = draft.read().clone();
        if !visible_errors(&current, true).is_empty() {
            return;
        }
        let Some(Ok(original)) = data.read().clone() else {
            return;
        };
        let patch = meeting_changes(&current, &original);
        spawn(async move {
            saving.set(true);
            match server::api::update_meeting(id, patch).await {
                Ok(_) => {
                    toast.success("Meeting updated".to_string(), ToastOptions::new());
                    navigator().push(Route::MeetingDetail { id });
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

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "Edit meeting" }
            }
            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(_)) => rsx! {
                            Form { onsubmit: handle_save,
                                MeetingForm { draft, submitted, read_only: saving() }
                                FormActions {
                                    Link { to: Route::MeetingDetail { id },
                                        Button { variant: ButtonVariant::Ghost, "Cancel" }
                                    }
                                    Button {
                                        variant: ButtonVariant::Primary,
                                        button_type: "submit",
                                        loading: saving(),
                                        "Save changes"
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "error-text", "{error_message(e)}" }
                        },
                        None => rsx! { SkeletonRows { count: 4 } },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meeting() -> Meeting {
        let at = Utc.with_ymd_and_hms(2022, 6, 1, 14, 0, 0).unwrap();
        Meeting {
            id: 3,
            legal_case: 1,
            name: String::new(),
            location: "Office".into(),
            meeting_type: "Consultation".into(),
            meeting_date: at,
            notes: "First visit".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn unchanged_draft_sends_empty_patch() {
        let m = meeting();
        let patch = meeting_changes(&MeetingDraft::from_meeting(&m), &m);
        assert_eq!(patch, UpdateMeetingRequest::default());
    }

    #[test]
    fn moved_meeting_sends_new_date_only() {
        let m = meeting();
        let mut draft = MeetingDraft::from_meeting(&m);
        draft.meeting_date = "2022-06-02T09:30".into();

        let patch = meeting_changes(&draft, &m);
        assert_eq!(
            patch.meeting_date,
            Some(Utc.with_ymd_and_hms(2022, 6, 2, 9, 30, 0).unwrap())
        );
        assert_eq!(patch.location, None);
        assert_eq!(patch.notes, None);
    }
}
