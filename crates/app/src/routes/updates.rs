use dioxus::prelude::*;
use shared_types::LogQuery;
use shared_ui::components::{PageHeader, PageSubtitle, PageTitle};

use crate::components::log_table::LogTable;

/// Activity feed across every case.
#[component]
pub fn Updates() -> Element {
    rsx! {
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "Updates" }
                    PageSubtitle { "Recent activity on clients, cases and files" }
                }
            }
            LogTable { query: LogQuery::default() }
        }
    }
}
