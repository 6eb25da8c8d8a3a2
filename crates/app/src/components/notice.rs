use dioxus::prelude::*;
use shared_types::NOTICE_DURATION_MS;

use crate::timing::{sleep_ms, Expiring};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeMessage {
    pub kind: NoticeKind,
    pub text: String,
}

/// Inline success/error banner that clears itself after
/// `NOTICE_DURATION_MS`. A newer message restarts the countdown.
#[derive(Clone, Copy, PartialEq)]
pub struct Notice {
    state: Signal<Expiring<NoticeMessage>>,
}

impl Notice {
    pub fn success(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Error, text.into());
    }

    pub fn dismiss(&mut self) {
        self.state.write().clear();
    }

    pub fn current(&self) -> Option<NoticeMessage> {
        self.state.read().get().cloned()
    }

    fn show(&mut self, kind: NoticeKind, text: String) {
        let shown = self.state.write().set(NoticeMessage { kind, text });

        let mut state = self.state;
        spawn(async move {
            sleep_ms(NOTICE_DURATION_MS).await;
            if state.peek().is_current(shown) {
                state.write().expire(shown);
            }
        });
    }
}

pub fn use_notice() -> Notice {
    Notice {
        state: use_signal(Expiring::default),
    }
}

#[component]
pub fn NoticeBanner(mut notice: Notice) -> Element {
    let Some(msg) = notice.current() else {
        return rsx! {};
    };
    let class = match msg.kind {
        NoticeKind::Success => "notice notice-success",
        NoticeKind::Error => "notice notice-error",
    };

    rsx! {
        div { class: class, role: "status",
            span { "{msg.text}" }
            button {
                class: "notice-close",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| notice.dismiss(),
                "\u{00d7}"
            }
        }
    }
}
