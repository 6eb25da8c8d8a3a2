use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::Meeting;
use shared_ui::components::{
    Card, CardContent, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, PageHeader, PageTitle, SearchBar, SkeletonRows,
};

use crate::format_helpers::{error_message, format_datetime_human};
use crate::routes::Route;

/// Meetings matching `query` on type, location or notes, latest first.
pub fn filter_meetings<'a>(meetings: &'a [Meeting], query: &str) -> Vec<&'a Meeting> {
    let needle = query.trim().to_lowercase();
    let mut shown: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.meeting_type.to_lowercase().contains(&needle)
                || m.location.to_lowercase().contains(&needle)
                || m.notes.to_lowercase().contains(&needle)
        })
        .collect();
    shown.sort_by(|a, b| b.meeting_date.cmp(&a.meeting_date));
    shown
}

#[component]
pub fn MeetingListPage() -> Element {
    let mut search = use_signal(String::new);

    let data = use_resource(|| async { server::api::list_meetings(None).await });
    let cases = use_resource(|| async { server::api::list_legal_cases(None).await.unwrap_or_default() });

    let case_numbers: HashMap<i64, String> = cases
        .read()
        .iter()
        .flatten()
        .map(|c| (c.id, c.case_number.clone()))
        .collect();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Meetings" }
            }
            SearchBar {
                value: search(),
                placeholder: "Search by type, location or notes",
                on_search: move |q: String| search.set(q),
            }
            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(list)) => {
                            let shown = filter_meetings(list, &search.read());
                            rsx! {
                                DataTable {
                                    DataTableHeader {
                                        DataTableColumn { "Date" }
                                        DataTableColumn { "Case" }
                                        DataTableColumn { "Type" }
                                        DataTableColumn { "Location" }
                                    }
                                    DataTableBody {
                                        if shown.is_empty() {
                                            DataTableEmpty { columns: 4, message: "No meetings found" }
                                        }
                                        for m in shown {
                                            {
                                                let id = m.id;
                                                let number = case_numbers.get(&m.legal_case).cloned().unwrap_or_default();
                                                rsx! {
                                                    DataTableRow {
                                                        key: "{id}",
                                                        onclick: move |_| { navigator().push(Route::MeetingDetail { id }); },
                                                        DataTableCell { "{format_datetime_human(&m.meeting_date)}" }
                                                        DataTableCell { "{number}" }
                                                        DataTableCell { "{m.meeting_type}" }
                                                        DataTableCell { "{m.location}" }
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
    use chrono::{TimeZone, Utc};

    fn meeting(id: i64, day: u32, location: &str) -> Meeting {
        let at = Utc.with_ymd_and_hms(2022, 3, day, 9, 0, 0).unwrap();
        Meeting {
            id,
            legal_case: 1,
            name: String::new(),
            location: location.into(),
            meeting_type: "Consultation".into(),
            meeting_date: at,
            notes: "Discussed next steps".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn latest_meeting_first() {
        let list = vec![meeting(1, 2, "Office"), meeting(2, 9, "Court"), meeting(3, 5, "Home")];
        let ids: Vec<i64> = filter_meetings(&list, "").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn search_matches_location() {
        let list = vec![meeting(1, 2, "Office"), meeting(2, 9, "Magistrate court")];
        let ids: Vec<i64> = filter_meetings(&list, "COURT").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
