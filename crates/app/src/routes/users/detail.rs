use dioxus::prelude::*;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, DetailItem, DetailList,
    PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows,
};

use crate::auth::use_auth;
use crate::format_helpers::{error_message, format_date_human};
use crate::routes::Route;

#[component]
pub fn UserDetailPage(id: i64) -> Element {
    let auth = use_auth();
    let is_self = auth.user_id() == Some(id);

    let data = use_resource(move || async move { server::api::get_user(id).await });
    let offices = use_resource(|| async { server::api::list_case_offices().await.unwrap_or_default() });

    let office_name = move |office: Option<i64>| -> String {
        let Some(office) = office else {
            return "Unassigned".to_string();
        };
        offices
            .read()
            .as_ref()
            .and_then(|all| all.iter().find(|o| o.id == office).map(|o| o.name.clone()))
            .unwrap_or_default()
    };

    rsx! {
        div { class: "container narrow",
            match &*data.read() {
                Some(Ok(user)) => rsx! {
                    PageHeader {
                        div {
                            PageTitle { "{user.name}" }
                            PageSubtitle { "@{user.username} since {format_date_human(&user.created_at)}" }
                        }
                        if is_self {
                            PageActions {
                                Link { to: Route::UserEdit { id },
                                    Button { variant: ButtonVariant::Primary, "Edit profile" }
                                }
                            }
                        }
                    }
                    Card {
                        CardHeader { CardTitle { "Profile" } }
                        CardContent {
                            DetailList {
                                DetailItem { label: "Email", value: user.email.clone() }
                                DetailItem { label: "Contact number", value: user.contact_number.clone() }
                                DetailItem { label: "Membership number", value: user.membership_number.clone() }
                                DetailItem { label: "Case office", value: office_name(user.case_office) }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    Card {
                        CardContent {
                            div { class: "empty-state",
                                h2 { "User not found" }
                                p { "{error_message(e)}" }
                                Link { to: Route::Dashboard {},
                                    Button { "Back to dashboard" }
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
