pub mod detail;
pub mod edit;

use dioxus::prelude::*;

#[component]
pub fn UserDetail(id: i64) -> Element {
    rsx! { detail::UserDetailPage { id } }
}

#[component]
pub fn UserEdit(id: i64) -> Element {
    rsx! { edit::UserEditPage { id } }
}
