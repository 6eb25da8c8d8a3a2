use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{
    format_log_date, log_count_label, log_label, visible_logs, Log, LogQuery, TARGET_LEGAL_CASE,
};
use shared_ui::{
    Card, CardContent, CardHeader, CardTitle, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, SearchBar, SkeletonRows,
};

use crate::routes::Route;

/// The legal case an entry belongs to: its parent when the parent is a
/// case, else the target itself when that is a case.
pub fn case_for_log(log: &Log) -> Option<i64> {
    if log.parent_type == TARGET_LEGAL_CASE {
        log.parent_id
    } else if log.target_type == TARGET_LEGAL_CASE {
        log.target_id
    } else {
        None
    }
}

/// Searchable activity feed, newest first.
#[component]
pub fn LogTable(query: LogQuery) -> Element {
    let mut search = use_signal(String::new);

    let logs = use_resource(move || {
        let q = query.clone();
        async move { server::api::list_logs(q).await }
    });
    let cases = use_resource(|| async {
        server::api::list_legal_cases(None).await.unwrap_or_default()
    });
    let clients = use_resource(|| async {
        server::api::list_clients(None).await.unwrap_or_default()
    });

    // case id -> (case number, client id)
    let case_lookup: HashMap<i64, (String, i64)> = cases
        .read()
        .as_ref()
        .map(|cs| {
            cs.iter()
                .map(|c| (c.id, (c.case_number.clone(), c.client)))
                .collect()
        })
        .unwrap_or_default();
    let client_names: HashMap<i64, String> = clients
        .read()
        .as_ref()
        .map(|cs| cs.iter().map(|c| (c.id, c.name.clone())).collect())
        .unwrap_or_default();

    rsx! {
        Card {
            match &*logs.read() {
                Some(Ok(all)) => {
                    let shown = visible_logs(all, &search.read());
                    rsx! {
                        CardHeader {
                            CardTitle { "{log_count_label(shown.len())}" }
                        }
                        CardContent {
                            SearchBar {
                                value: search(),
                                placeholder: "Search activity",
                                on_search: move |q: String| search.set(q),
                            }
                            DataTable {
                                DataTableHeader {
                                    DataTableColumn { "Date" }
                                    DataTableColumn { "Activity" }
                                    DataTableColumn { "Case" }
                                    DataTableColumn { "Client" }
                                    DataTableColumn { "Note" }
                                }
                                DataTableBody {
                                    if shown.is_empty() {
                                        DataTableEmpty { columns: 5, message: "No activity yet" }
                                    }
                                    for log in shown {
                                        {
                                            let case = case_for_log(log).and_then(|id| {
                                                case_lookup.get(&id).map(|(number, client)| (id, number.clone(), *client))
                                            });
                                            rsx! {
                                                DataTableRow { key: "{log.id}",
                                                    DataTableCell { "{format_log_date(&log.created_at)}" }
                                                    DataTableCell { "{log_label(&log.target_type, &log.action)}" }
                                                    DataTableCell {
                                                        if let Some((id, number, _)) = &case {
                                                            Link { to: Route::CaseDetail { id: *id }, "{number}" }
                                                        } else {
                                                            "-"
                                                        }
                                                    }
                                                    DataTableCell {
                                                        match case.as_ref().and_then(|(_, _, client)| client_names.get(client).map(|n| (*client, n.clone()))) {
                                                            Some((client_id, name)) => rsx! {
                                                                Link { to: Route::ClientDetail { id: client_id }, "{name}" }
                                                            },
                                                            None => rsx! { "-" },
                                                        }
                                                    }
                                                    DataTableCell { "{log.note}" }
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
                        p { class: "error-text", "Could not load activity: {e}" }
                    }
                },
                None => rsx! {
                    CardContent { SkeletonRows { count: 5 } }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log(parent: Option<(i64, &str)>, target: (i64, &str)) -> Log {
        Log {
            id: 1,
            created_at: Utc::now(),
            parent_id: parent.map(|p| p.0),
            parent_type: parent.map(|p| p.1.to_string()).unwrap_or_default(),
            target_id: Some(target.0),
            target_type: target.1.to_string(),
            action: "Create".into(),
            note: String::new(),
            user: Some(1),
        }
    }

    #[test]
    fn meeting_log_resolves_to_parent_case() {
        let l = log(Some((7, "LegalCase")), (3, "Meeting"));
        assert_eq!(case_for_log(&l), Some(7));
    }

    #[test]
    fn case_log_resolves_to_itself() {
        let l = log(None, (9, "LegalCase"));
        assert_eq!(case_for_log(&l), Some(9));
    }

    #[test]
    fn unrelated_log_has_no_case() {
        let l = log(None, (2, "Client"));
        assert_eq!(case_for_log(&l), None);
    }
}
