use dioxus::prelude::*;
use shared_types::LogQuery;

use crate::components::log_table::LogTable;

#[component]
pub fn CaseLogTab(legal_case: i64) -> Element {
    rsx! {
        LogTable { query: LogQuery::for_legal_case(legal_case) }
    }
}
