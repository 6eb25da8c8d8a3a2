use dioxus::prelude::*;
use shared_types::identifier_type_label;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ConfirmDialog, DetailList,
    DetailItem, PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::format_helpers::{error_message, format_date_human};
use crate::routes::Route;

#[component]
pub fn ClientDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut show_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let data = use_resource(move || async move { server::api::get_client(id).await });

    let handle_delete = move |_: MouseEvent| {
        spawn(async move {
            deleting.set(true);
            match server::api::delete_client(id).await {
                Ok(()) => {
                    toast.success("Client deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::ClientList {});
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
        div { class: "container",
            match &*data.read() {
                Some(Ok(client)) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "{client.name}" }
                            PageSubtitle { "Client since {format_date_human(&client.created_at)}" }
                        }
                        PageActions {
                            Link { to: Route::ClientCases { id },
                                Button { variant: ButtonVariant::Secondary, "Cases ({client.legal_cases.len()})" }
                            }
                            Link { to: Route::ClientEdit { id },
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
                        CardHeader { CardTitle { "Details" } }
                        CardContent {
                            DetailList {
                                DetailItem { label: "Full name", value: client.name.clone() }
                                DetailItem { label: "Preferred name", value: client.preferred_name.clone() }
                                DetailItem {
                                    label: identifier_type_label(&client.official_identifier_type).to_string(),
                                    value: client.official_identifier.clone(),
                                }
                                DetailItem { label: "Contact number", value: client.contact_number.clone() }
                                DetailItem { label: "Email", value: client.contact_email.clone() }
                            }
                        }
                    }
                    ConfirmDialog {
                        open: show_delete(),
                        on_open_change: move |v| show_delete.set(v),
                        title: "Delete client",
                        message: "This removes the client and every case, meeting and file recorded for them.",
                        busy: deleting(),
                        on_confirm: handle_delete,
                    }
                },
                Some(Err(e)) => rsx! {
                    Card {
                        CardContent {
                            div { class: "empty-state",
                                h2 { "Client not found" }
                                p { "{error_message(e)}" }
                                Link { to: Route::ClientList {},
                                    Button { "Back to clients" }
                                }
                            }
                        }
                    }
                },
                None => rsx! { SkeletonRows { count: 5 } },
            }
        }
    }
}
