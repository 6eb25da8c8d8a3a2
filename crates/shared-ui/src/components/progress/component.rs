use dioxus::prelude::*;
use dioxus_primitives::progress as prim;

#[component]
pub fn Progress(mut props: prim::ProgressProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "progress", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Progress { ..props }
    }
}

#[component]
pub fn ProgressIndicator(mut props: prim::ProgressIndicatorProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "progress-indicator", None, false));

    rsx! {
        prim::ProgressIndicator { ..props }
    }
}

/// Labelled bar for a running upload. Hidden at 0%.
#[component]
pub fn UploadProgress(percent: u8, #[props(default)] label: String) -> Element {
    if percent == 0 {
        return rsx! {};
    }
    let pct = percent.min(100);

    rsx! {
        div { class: "upload-progress",
            div { class: "upload-progress-label",
                span { "{label}" }
                span { "{pct}%" }
            }
            Progress {
                value: Some(pct as f64),
                ProgressIndicator {}
            }
        }
    }
}
