use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input};
use std::collections::HashMap;

/// Username/password sign-in. A signed-in visitor is sent straight on to
/// the dashboard.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth.is_authenticated() {
            navigator().replace(Route::Dashboard {});
        }
    });

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(username(), password()).await {
            Ok(user) => {
                auth.set_user(user);
                navigator().push(Route::Dashboard {});
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(shared_types::AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                CardHeader {
                    CardTitle { "Sign in to Casebook" }
                    CardDescription { "Use the account issued by your case office." }
                }
                CardContent {
                    if let Some(msg) = error_msg() {
                        div { class: "auth-error", role: "alert", "{msg}" }
                    }
                    form { class: "auth-form", novalidate: true, onsubmit: handle_login,
                        Input {
                            label: "Username",
                            value: username(),
                            placeholder: "Username",
                            error: field_errors().get("username").cloned().unwrap_or_default(),
                            on_input: move |e: FormEvent| username.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            value: password(),
                            placeholder: "Password",
                            error: field_errors().get("password").cloned().unwrap_or_default(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            loading: loading(),
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
            }
        }
    }
}

/// Clears the session cookie and returns to the sign-in page.
#[component]
pub fn Logout() -> Element {
    let mut auth = use_auth();

    use_future(move || async move {
        if let Err(e) = server::api::logout().await {
            tracing::warn!("logout failed: {e}");
        }
        auth.clear_auth();
        navigator().replace(Route::Login {});
    });

    rsx! {
        div { class: "auth-guard-loading",
            p { "Signing out..." }
        }
    }
}
