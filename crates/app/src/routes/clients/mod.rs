pub mod cases;
pub mod detail;
pub mod form;
pub mod list;

use dioxus::prelude::*;

#[component]
pub fn ClientList() -> Element {
    rsx! { list::ClientListPage {} }
}

#[component]
pub fn ClientCreate() -> Element {
    rsx! { form::ClientCreatePage {} }
}

#[component]
pub fn ClientDetail(id: i64) -> Element {
    rsx! { detail::ClientDetailPage { id } }
}

#[component]
pub fn ClientEdit(id: i64) -> Element {
    rsx! { form::ClientEditPage { id } }
}

#[component]
pub fn ClientCases(id: i64) -> Element {
    rsx! { cases::ClientCasesPage { id } }
}
