use dioxus::prelude::*;
use shared_types::Client;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FormSelect, PageActions,
    PageHeader, PageTitle, SearchBar, SkeletonRows,
};

use crate::format_helpers::error_message;
use crate::routes::Route;

/// Case-insensitive match on name, preferred name, identifier or email.
pub fn client_matches(client: &Client, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        &client.name,
        &client.preferred_name,
        &client.official_identifier,
        &client.contact_email,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[component]
pub fn ClientListPage() -> Element {
    let mut search = use_signal(String::new);
    let mut office = use_signal(|| Option::<i64>::None);

    let data = use_resource(move || {
        let office = office();
        async move { server::api::list_clients(office).await }
    });
    let offices = use_resource(|| async { server::api::list_case_offices().await.unwrap_or_default() });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Clients" }
                PageActions {
                    Link { to: Route::ClientCreate {},
                        Button { variant: ButtonVariant::Primary, "New client" }
                    }
                }
            }

            SearchBar {
                value: search(),
                placeholder: "Search by name, identifier or email",
                on_search: move |q: String| search.set(q),
                FormSelect {
                    value: office().map(|id| id.to_string()).unwrap_or_default(),
                    onchange: move |evt: Event<FormData>| office.set(evt.value().parse().ok()),
                    option { value: "", "All offices" }
                    for o in offices.read().iter().flatten() {
                        option { key: "{o.id}", value: "{o.id}", "{o.name}" }
                    }
                }
            }

            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(clients)) => {
                            let q = search.read().clone();
                            let shown: Vec<&Client> = clients.iter().filter(|c| client_matches(c, &q)).collect();
                            rsx! {
                                DataTable {
                                    DataTableHeader {
                                        DataTableColumn { "Name" }
                                        DataTableColumn { "Preferred name" }
                                        DataTableColumn { "Contact" }
                                        DataTableColumn { "Cases" }
                                    }
                                    DataTableBody {
                                        if shown.is_empty() {
                                            DataTableEmpty { columns: 4, message: "No clients found" }
                                        }
                                        for c in shown {
                                            {
                                                let id = c.id;
                                                rsx! {
                                                    DataTableRow {
                                                        key: "{id}",
                                                        onclick: move |_| { navigator().push(Route::ClientDetail { id }); },
                                                        DataTableCell { "{c.name}" }
                                                        DataTableCell { "{c.preferred_name}" }
                                                        DataTableCell { "{c.contact_number}" }
                                                        DataTableCell { "{c.legal_cases.len()}" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        Some(Err(e)) => rsx! {
                            p { class: "error-text", "{error_message(e)}" }
                        },
                        None => rsx! { SkeletonRows { count: 6 } },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn client(name: &str, email: &str) -> Client {
        Client {
            id: 1,
            name: name.into(),
            preferred_name: "Jo".into(),
            official_identifier: "8001015009087".into(),
            official_identifier_type: "national_id".into(),
            contact_number: "0821234567".into(),
            contact_email: email.into(),
            legal_cases: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn blank_query_matches_everyone() {
        assert!(client_matches(&client("Joanna Dlamini", "j@example.com"), "  "));
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let c = client("Joanna Dlamini", "joanna@example.com");
        assert!(client_matches(&c, "DLAMINI"));
        assert!(client_matches(&c, "example.com"));
        assert!(client_matches(&c, "5009"));
        assert!(!client_matches(&c, "Mokoena"));
    }
}
