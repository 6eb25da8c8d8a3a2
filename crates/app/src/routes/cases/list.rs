use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{LegalCase, LegalCaseState, LEGAL_CASE_STATES};
use shared_ui::components::{
    Card, CardContent, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, FormSelect, PageHeader, PageTitle, SearchBar, SkeletonRows,
};

use crate::components::state_badge::StateBadge;
use crate::format_helpers::{error_message, format_date_human};
use crate::routes::Route;

/// Cases whose number, summary or client name contain `query`, limited to
/// `state` when one is picked.
pub fn filter_cases<'a>(
    cases: &'a [LegalCase],
    client_names: &HashMap<i64, String>,
    query: &str,
    state: Option<LegalCaseState>,
) -> Vec<&'a LegalCase> {
    let needle = query.trim().to_lowercase();
    cases
        .iter()
        .filter(|c| state.is_none_or(|s| c.state == s))
        .filter(|c| {
            needle.is_empty()
                || c.case_number.to_lowercase().contains(&needle)
                || c.summary.to_lowercase().contains(&needle)
                || client_names
                    .get(&c.client)
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .collect()
}

#[component]
pub fn CaseListPage() -> Element {
    let mut search = use_signal(String::new);
    let mut state = use_signal(|| Option::<LegalCaseState>::None);

    let data = use_resource(|| async { server::api::list_legal_cases(None).await });
    let clients = use_resource(|| async { server::api::list_clients(None).await.unwrap_or_default() });

    let client_names: HashMap<i64, String> = clients
        .read()
        .iter()
        .flatten()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Cases" }
            }

            SearchBar {
                value: search(),
                placeholder: "Search by case number, summary or client",
                on_search: move |q: String| search.set(q),
                FormSelect {
                    value: state().map(|s| s.as_str().to_string()).unwrap_or_default(),
                    onchange: move |evt: Event<FormData>| state.set(LegalCaseState::parse(&evt.value())),
                    option { value: "", "All states" }
                    for s in LEGAL_CASE_STATES.iter() {
                        option { key: "{s.as_str()}", value: s.as_str(), "{s.label()}" }
                    }
                }
            }

            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(cases)) => {
                            let shown = filter_cases(cases, &client_names, &search.read(), state());
                            rsx! {
                                DataTable {
                                    DataTableHeader {
                                        DataTableColumn { "Case number" }
                                        DataTableColumn { "Client" }
                                        DataTableColumn { "Status" }
                                        DataTableColumn { "Summary" }
                                        DataTableColumn { "Opened" }
                                    }
                                    DataTableBody {
                                        if shown.is_empty() {
                                            DataTableEmpty { columns: 5, message: "No cases found" }
                                        }
                                        for c in shown {
                                            {
                                                let id = c.id;
                                                let client = client_names.get(&c.client).cloned().unwrap_or_default();
                                                rsx! {
                                                    DataTableRow {
                                                        key: "{id}",
                                                        onclick: move |_| { navigator().push(Route::CaseDetail { id }); },
                                                        DataTableCell { "{c.case_number}" }
                                                        DataTableCell { "{client}" }
                                                        DataTableCell { StateBadge { state: c.state } }
                                                        DataTableCell { "{c.summary}" }
                                                        DataTableCell { "{format_date_human(&c.created_at)}" }
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
