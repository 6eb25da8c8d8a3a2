use dioxus::prelude::*;
use shared_types::MeetingDraft;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, ConfirmDialog, PageActions, PageHeader,
    PageSubtitle, PageTitle, SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::components::meeting_form::MeetingForm;
use crate::format_helpers::{error_message, format_datetime_human};
use crate::routes::Route;

/// Read-only view of a meeting in the same layout as the edit form.
#[component]
pub fn MeetingDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut draft = use_signal(|| MeetingDraft::new(chrono::Local::now().naive_local()));
    let submitted = use_signal(|| false);
    let mut show_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let data = use_resource(move || async move { server::api::get_meeting(id).await });

    use_effect(move || {
        if let Some(Ok(m)) = &*data.read() {
            draft.set(MeetingDraft::from_meeting(m));
        }
    });

    let handle_delete = move |_: MouseEvent| {
        let legal_case = match &*data.read() {
            Some(Ok(m)) => Some(m.legal_case),
            _ => None,
        };
        spawn(async move {
            deleting.set(true);
            match server::api::delete_meeting(id).await {
                Ok(()) => {
                    toast.success("Meeting deleted".to_string(), ToastOptions::new());
                    match legal_case {
                        Some(case_id) => navigator().push(Route::CaseDetail { id: case_id }),
                        None => navigator().push(Route::MeetingList {}),
                    };
                }
                Err(e) => {
                    toast.error(error_message(&e), ToastOptions::new());
                    deleting.set(false);
                    show_delete.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "container narrow",
            match &*data.read() {
                Some(Ok(meeting)) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "{meeting.meeting_type}" }
                            PageSubtitle { "{format_datetime_human(&meeting.meeting_date)}" }
                        }
                        PageActions {
                            Link { to: Route::CaseDetail { id: meeting.legal_case },
                                Button { variant: ButtonVariant::Secondary, "View case" }
                            }
                            Link { to: Route::MeetingEdit { id },
                                Button { variant: ButtonVariant::Primary, "Edit" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| show_delete.set(true),
                                "Delete"
                            }
                        }
                    }
                    Card {
                        CardContent {
                            MeetingForm { draft, submitted, read_only: true }
                        }
                    }
                    ConfirmDialog {
                        open: show_delete(),
                        on_open_change: move |v| show_delete.set(v),
                        title: "Delete meeting",
                        message: "The meeting is removed from the case record.",
                        busy: deleting(),
                        on_confirm: handle_delete,
                    }
                },
                Some(Err(e)) => rsx! {
                    Card {
                        CardContent {
                            div { class: "empty-state",
                                h2 { "Meeting not found" }
                                p { "{error_message(e)}" }
                                Link { to: Route::MeetingList {},
                                    Button { "Back to meetings" }
                                }
                            }
                        }
                    }
                },
                None => rsx! { SkeletonRows { count: 4 } },
            }
        }
    }
}
