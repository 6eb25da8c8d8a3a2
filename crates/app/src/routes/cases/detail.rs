use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ConfirmDialog, DetailList,
    DetailItem, PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows, TabContent,
    TabList, TabTrigger, Tabs,
};
use shared_ui::{use_toast, ToastOptions};

use super::form::{CaseDraft, CaseFormDialog};
use super::tabs::{
    files::CaseFileTab, logs::CaseLogTab, meetings::CaseMeetingTab, updates::CaseUpdateTab,
};
use crate::components::state_badge::StateBadge;
use crate::format_helpers::{error_message, format_date_human, names_for};
use crate::routes::Route;

#[component]
pub fn CaseDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut show_edit = use_signal(|| false);
    let mut show_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut draft = use_signal(CaseDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);

    let mut data = use_resource(move || async move { server::api::get_legal_case(id).await });
    let client = use_resource(move || {
        let client_id = match &*data.read() {
            Some(Ok(c)) => Some(c.client),
            _ => None,
        };
        async move {
            match client_id {
                Some(cid) => server::api::get_client(cid).await.ok(),
                None => None,
            }
        }
    });
    let offices = use_resource(|| async { server::api::list_case_offices().await.unwrap_or_default() });
    let case_types = use_resource(|| async { server::api::list_case_types().await.unwrap_or_default() });
    let users = use_resource(|| async { server::api::list_users().await.unwrap_or_default() });

    let open_edit = move |_| {
        if let Some(Ok(c)) = &*data.read() {
            draft.set(CaseDraft::from_case(c));
            errors.set(HashMap::new());
            show_edit.set(true);
        }
    };

    let handle_edit = move |_| {
        let Some(Ok(original)) = data.read().clone() else {
            return;
        };
        let d = draft.read().clone();
        let local = d.validate();
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        let patch = d.changes_from(&original);
        spawn(async move {
            saving.set(true);
            match server::api::update_legal_case(id, patch).await {
                Ok(_) => {
                    show_edit.set(false);
                    toast.success("Case updated".to_string(), ToastOptions::new());
                    data.restart();
                }
                Err(e) => {
                    let fe = AppError::parse_field_errors(&e.to_string());
                    if fe.is_empty() {
                        toast.error(error_message(&e), ToastOptions::new());
                    }
                    errors.set(fe);
                }
            }
            saving.set(false);
        });
    };

    let handle_delete = move |_: MouseEvent| {
        let client_id = match &*data.read() {
            Some(Ok(c)) => Some(c.client),
            _ => None,
        };
        spawn(async move {
            deleting.set(true);
            match server::api::delete_legal_case(id).await {
                Ok(()) => {
                    toast.success("Case deleted".to_string(), ToastOptions::new());
                    match client_id {
                        Some(cid) => navigator().push(Route::ClientCases { id: cid }),
                        None => navigator().push(Route::CaseList {}),
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

    let office_names: HashMap<i64, String> = offices
        .read()
        .iter()
        .flatten()
        .map(|o| (o.id, o.name.clone()))
        .collect();
    let type_names: HashMap<i64, String> = case_types
        .read()
        .iter()
        .flatten()
        .map(|t| (t.id, t.title.clone()))
        .collect();
    let user_names: HashMap<i64, String> = users
        .read()
        .iter()
        .flatten()
        .map(|u| (u.id, if u.name.is_empty() { u.username.clone() } else { u.name.clone() }))
        .collect();

    rsx! {
        div { class: "container",
            match &*data.read() {
                Some(Ok(case)) => {
                    let client_name = client
                        .read()
                        .as_ref()
                        .and_then(|c| c.as_ref().map(|c| c.name.clone()))
                        .unwrap_or_default();
                    let state = case.state;
                    rsx! {
                        PageHeader {
                            div {
                                PageTitle { "{case.case_number}" }
                                PageSubtitle { "Opened {format_date_human(&case.created_at)}" }
                            }
                            PageActions {
                                StateBadge { state: case.state }
                                Button { variant: ButtonVariant::Secondary, onclick: open_edit, "Edit details" }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: move |_| show_delete.set(true),
                                    "Delete"
                                }
                            }
                        }

                        Card {
                            CardHeader { CardTitle { "Case details" } }
                            CardContent {
                                DetailList {
                                    DetailItem { label: "Client",
                                        Link { to: Route::ClientDetail { id: case.client }, "{client_name}" }
                                    }
                                    DetailItem { label: "Summary", value: case.summary.clone() }
                                    DetailItem {
                                        label: "Case offices",
                                        value: names_for(&case.case_offices, |i| office_names.get(&i).map(String::as_str)),
                                    }
                                    DetailItem {
                                        label: "Case types",
                                        value: names_for(&case.case_types, |i| type_names.get(&i).map(String::as_str)),
                                    }
                                    DetailItem {
                                        label: "Case officers",
                                        value: names_for(&case.users, |i| user_names.get(&i).map(String::as_str)),
                                    }
                                }
                            }
                        }

                        Tabs { default_value: "updates", horizontal: true,
                            TabList {
                                TabTrigger { value: "updates", index: 0usize, "Updates" }
                                TabTrigger { value: "files", index: 1usize, "Files" }
                                TabTrigger { value: "meetings", index: 2usize, "Meetings" }
                                TabTrigger { value: "logs", index: 3usize, "Logs" }
                            }
                            TabContent { value: "updates", index: 0usize,
                                CaseUpdateTab {
                                    legal_case: id,
                                    state,
                                    on_state_change: move |_| data.restart(),
                                }
                            }
                            TabContent { value: "files", index: 1usize,
                                CaseFileTab { legal_case: id }
                            }
                            TabContent { value: "meetings", index: 2usize,
                                CaseMeetingTab { legal_case: id }
                            }
                            TabContent { value: "logs", index: 3usize,
                                CaseLogTab { legal_case: id }
                            }
                        }

                        CaseFormDialog {
                            open: show_edit(),
                            on_open_change: move |v| show_edit.set(v),
                            title: "Edit case",
                            draft,
                            errors: errors(),
                            busy: saving(),
                            submit_label: "Save changes",
                            on_submit: handle_edit,
                        }
                        ConfirmDialog {
                            open: show_delete(),
                            on_open_change: move |v| show_delete.set(v),
                            title: "Delete case",
                            message: "This removes the case together with its meetings, files and updates.",
                            busy: deleting(),
                            on_confirm: handle_delete,
                        }
                    }
                }
                Some(Err(e)) => rsx! {
                    Card {
                        CardContent {
                            div { class: "empty-state",
                                h2 { "Case not found" }
                                p { "{error_message(e)}" }
                                Link { to: Route::CaseList {},
                                    Button { "Back to cases" }
                                }
                            }
                        }
                    }
                },
                None => rsx! { SkeletonRows { count: 6 } },
            }
        }
    }
}
