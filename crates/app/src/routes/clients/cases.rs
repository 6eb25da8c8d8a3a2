use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, PageActions, PageHeader,
    PageSubtitle, PageTitle, SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::auth::use_auth;
use crate::components::state_badge::StateBadge;
use crate::format_helpers::{error_message, format_date_human};
use crate::routes::cases::form::{CaseDraft, CaseFormDialog};
use crate::routes::Route;

/// A client's legal cases, with the dialog for opening a new one.
#[component]
pub fn ClientCasesPage(id: i64) -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut show_new = use_signal(|| false);
    let mut draft = use_signal(CaseDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let client = use_resource(move || async move { server::api::get_client(id).await });
    let cases = use_resource(move || async move { server::api::list_legal_cases(Some(id)).await });

    let open_new = move |_| {
        let user = auth.current_user.read().clone();
        draft.set(CaseDraft::for_officer(
            user.as_ref().map(|u| u.id),
            user.as_ref().and_then(|u| u.case_office),
        ));
        errors.set(HashMap::new());
        show_new.set(true);
    };

    let handle_create = move |_| {
        let d = draft.read().clone();
        let local = d.validate();
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        spawn(async move {
            saving.set(true);
            match server::api::create_legal_case(d.into_create(id)).await {
                Ok(created) => {
                    show_new.set(false);
                    toast.success(
                        format!("Case {} opened", created.case_number),
                        ToastOptions::new(),
                    );
                    navigator().push(Route::CaseDetail { id: created.id });
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

    let client_name = match &*client.read() {
        Some(Ok(c)) => c.name.clone(),
        _ => String::new(),
    };

    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "Cases" }
                    if !client_name.is_empty() {
                        PageSubtitle { "{client_name}" }
                    }
                }
                PageActions {
                    Link { to: Route::ClientDetail { id },
                        Button { variant: ButtonVariant::Secondary, "Back to client" }
                    }
                    Button { variant: ButtonVariant::Primary, onclick: open_new, "New case" }
                }
            }

            Card {
                CardContent {
                    match &*cases.read() {
                        Some(Ok(list)) => rsx! {
                            DataTable {
                                DataTableHeader {
                                    DataTableColumn { "Case number" }
                                    DataTableColumn { "Status" }
                                    DataTableColumn { "Summary" }
                                    DataTableColumn { "Opened" }
                                }
                                DataTableBody {
                                    if list.is_empty() {
                                        DataTableEmpty { columns: 4, message: "No cases for this client yet" }
                                    }
                                    for c in list.iter() {
                                        {
                                            let case_id = c.id;
                                            rsx! {
                                                DataTableRow {
                                                    key: "{case_id}",
                                                    onclick: move |_| { navigator().push(Route::CaseDetail { id: case_id }); },
                                                    DataTableCell { "{c.case_number}" }
                                                    DataTableCell { StateBadge { state: c.state } }
                                                    DataTableCell { "{c.summary}" }
                                                    DataTableCell { "{format_date_human(&c.created_at)}" }
                                                }
                                            }
                                        }
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

            CaseFormDialog {
                open: show_new(),
                on_open_change: move |v| show_new.set(v),
                title: "New case",
                draft,
                errors: errors(),
                busy: saving(),
                submit_label: "Open case",
                on_submit: handle_create,
            }
        }
    }
}
