use dioxus::prelude::*;

/// Top bar of the signed-in layout.
///
/// Links are passed as children so the app can use its own router `Link`s;
/// `end` holds the right-hand controls (theme toggle, user menu).
#[component]
pub fn Navbar(brand: String, #[props(default)] end: Element, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        header { class: "cb-navbar",
            span { class: "cb-navbar-brand", "{brand}" }
            nav { class: "cb-navbar-links", aria_label: "Main", {children} }
            div { class: "cb-navbar-end", {end} }
        }
    }
}
