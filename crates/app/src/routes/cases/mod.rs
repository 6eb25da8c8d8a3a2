pub mod detail;
pub mod form;
pub mod list;
pub mod tabs;

use dioxus::prelude::*;

#[component]
pub fn CaseList() -> Element {
    rsx! { list::CaseListPage {} }
}

#[component]
pub fn CaseDetail(id: i64) -> Element {
    rsx! { detail::CaseDetailPage { id } }
}
