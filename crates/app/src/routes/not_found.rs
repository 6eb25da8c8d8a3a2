use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::components::{Button, ButtonVariant};

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }
        div { class: "not-found",
            h1 { class: "not-found-code", "404" }
            p { class: "not-found-message", "Nothing lives at {path}" }
            Link { to: Route::Dashboard {},
                Button { variant: ButtonVariant::Primary, "Go to dashboard" }
            }
        }
    }
}
