use dioxus::prelude::*;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, PageActions,
    SkeletonRows,
};

use crate::format_helpers::{error_message, format_datetime_human};
use crate::routes::Route;

#[component]
pub fn CaseMeetingTab(legal_case: i64) -> Element {
    let meetings = use_resource(move || async move {
        server::api::list_meetings(Some(legal_case)).await
    });

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Meetings" }
                PageActions {
                    Link { to: Route::MeetingCreate { id: legal_case },
                        Button { variant: ButtonVariant::Primary, "New meeting" }
                    }
                }
            }
            CardContent {
                match &*meetings.read() {
                    Some(Ok(list)) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Date" }
                                DataTableColumn { "Type" }
                                DataTableColumn { "Location" }
                                DataTableColumn { "Notes" }
                            }
                            DataTableBody {
                                if list.is_empty() {
                                    DataTableEmpty { columns: 4, message: "No meetings recorded" }
                                }
                                for m in list.iter() {
                                    {
                                        let id = m.id;
                                        rsx! {
                                            DataTableRow {
                                                key: "{id}",
                                                onclick: move |_| { navigator().push(Route::MeetingDetail { id }); },
                                                DataTableCell { "{format_datetime_human(&m.meeting_date)}" }
                                                DataTableCell { "{m.meeting_type}" }
                                                DataTableCell { "{m.location}" }
                                                DataTableCell { "{m.notes}" }
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
                    None => rsx! { SkeletonRows { count: 3 } },
                }
            }
        }
    }
}
