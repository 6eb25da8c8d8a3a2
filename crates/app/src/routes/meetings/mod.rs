pub mod create;
pub mod detail;
pub mod edit;
pub mod list;

use dioxus::prelude::*;

#[component]
pub fn MeetingList() -> Element {
    rsx! { list::MeetingListPage {} }
}

#[component]
pub fn MeetingDetail(id: i64) -> Element {
    rsx! { detail::MeetingDetailPage { id } }
}

#[component]
pub fn MeetingEdit(id: i64) -> Element {
    rsx! { edit::MeetingEditPage { id } }
}

/// New meeting for the legal case `id`.
#[component]
pub fn MeetingCreate(id: i64) -> Element {
    rsx! { create::MeetingCreatePage { legal_case: id } }
}
