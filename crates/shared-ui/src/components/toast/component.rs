use dioxus::prelude::*;
use dioxus_primitives::toast as prim;

pub use dioxus_primitives::toast::{consume_toast, use_toast, ToastOptions, ToastType, Toasts};

#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}

#[component]
pub fn Toast(mut props: prim::ToastProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "cb-toast", None, false));

    rsx! {
        prim::Toast { ..props }
    }
}

/// Toast the outcome of a mutation: `success` on Ok, the error text otherwise.
pub fn report_result<T, E: std::fmt::Display>(toasts: &Toasts, result: &Result<T, E>, success: &str) {
    match result {
        Ok(_) => toasts.success(success.to_string(), ToastOptions::new()),
        Err(e) => toasts.error(e.to_string(), ToastOptions::new()),
    }
}
