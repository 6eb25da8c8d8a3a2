use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{
    identifier_type_label, AppError, Client, CreateClientRequest, UpdateClientRequest,
    OFFICIAL_IDENTIFIER_TYPES,
};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, Form, FormActions, FormSelect, Input, PageHeader,
    PageTitle, SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::format_helpers::error_message;
use crate::routes::Route;

/// Editable client fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub preferred_name: String,
    pub official_identifier: String,
    pub official_identifier_type: String,
    pub contact_number: String,
    pub contact_email: String,
}

impl Default for ClientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            preferred_name: String::new(),
            official_identifier: String::new(),
            official_identifier_type: OFFICIAL_IDENTIFIER_TYPES[0].to_string(),
            contact_number: String::new(),
            contact_email: String::new(),
        }
    }
}

impl ClientDraft {
    pub fn from_client(c: &Client) -> Self {
        Self {
            name: c.name.clone(),
            preferred_name: c.preferred_name.clone(),
            official_identifier: c.official_identifier.clone(),
            official_identifier_type: c.official_identifier_type.clone(),
            contact_number: c.contact_number.clone(),
            contact_email: c.contact_email.clone(),
        }
    }

    pub fn into_create(self) -> CreateClientRequest {
        CreateClientRequest {
            name: self.name.trim().to_string(),
            preferred_name: self.preferred_name.trim().to_string(),
            official_identifier: self.official_identifier.trim().to_string(),
            official_identifier_type: self.official_identifier_type,
            contact_number: self.contact_number.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
        }
    }

    /// A patch carrying only the fields that differ from `original`.
    pub fn changes_from(&self, original: &ClientDraft) -> UpdateClientRequest {
        fn changed(new: &str, old: &str) -> Option<String> {
            (new.trim() != old).then(|| new.trim().to_string())
        }
        UpdateClientRequest {
            name: changed(&self.name, &original.name),
            preferred_name: changed(&self.preferred_name, &original.preferred_name),
            official_identifier: changed(&self.official_identifier, &original.official_identifier),
            official_identifier_type: changed(
                &self.official_identifier_type,
                &original.official_identifier_type,
            ),
            contact_number: changed(&self.contact_number, &original.contact_number),
            contact_email: changed(&self.contact_email, &original.contact_email),
        }
    }
}

#[component]
fn ClientFields(
    mut draft: Signal<ClientDraft>,
    errors: HashMap<String, String>,
    busy: bool,
) -> Element {
    let d = draft.read().clone();
    let err = |field: &str| errors.get(field).cloned().unwrap_or_default();

    rsx! {
        Input {
            label: "Full name",
            value: d.name,
            disabled: busy,
            error: err("name"),
            on_input: move |e: FormEvent| draft.write().name = e.value(),
        }
        Input {
            label: "Preferred name",
            value: d.preferred_name,
            disabled: busy,
            error: err("preferred_name"),
            on_input: move |e: FormEvent| draft.write().preferred_name = e.value(),
        }
        FormSelect {
            label: "Identifier type",
            value: d.official_identifier_type.clone(),
            disabled: busy,
            error: err("official_identifier_type"),
            onchange: move |e: Event<FormData>| draft.write().official_identifier_type = e.value(),
            for kind in OFFICIAL_IDENTIFIER_TYPES.iter() {
                option {
                    key: "{kind}",
                    value: *kind,
                    selected: *kind == d.official_identifier_type,
                    "{identifier_type_label(kind)}"
                }
            }
        }
        Input {
            label: "Identifier",
            value: d.official_identifier,
            disabled: busy,
            error: err("official_identifier"),
            on_input: move |e: FormEvent| draft.write().official_identifier = e.value(),
        }
        Input {
            label: "Contact number",
            input_type: "tel",
            value: d.contact_number,
            disabled: busy,
            error: err("contact_number"),
            on_input: move |e: FormEvent| draft.write().contact_number = e.value(),
        }
        Input {
            label: "Email",
            input_type: "email",
            value: d.contact_email,
            disabled: busy,
            error: err("contact_email"),
            on_input: move |e: FormEvent| draft.write().contact_email = e.value(),
        }
    }
}

#[component]
pub fn ClientCreatePage() -> Element {
    let toast = use_toast();
    let draft = use_signal(ClientDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        let body = draft.read().clone().into_create();
        spawn(async move {
            saving.set(true);
            errors.set(HashMap::new());
            match server::api::create_client(body).await {
                Ok(client) => {
                    toast.success("Client created".to_string(), ToastOptions::new());
                    navigator().push(Route::ClientDetail { id: client.id });
                }
                Err(e) => {
                    let fe = AppError::parse_field_errors(&e.to_string());
                    if fe.is_empty() {
                        toast.error(error_message(&e), ToastOptions::new());
                    }
                    errors.set(fe);
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "New client" }
            }
            Card {
                CardContent {
                    Form { onsubmit: handle_save,
                        ClientFields { draft, errors: errors(), busy: saving() }
                        FormActions {
                            Link { to: Route::ClientList {},
                                Button { variant: ButtonVariant::Ghost, "Cancel" }
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                loading: saving(),
                                "Create client"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ClientEditPage(id: i64) -> Element {
    let toast = use_toast();
    let mut draft = use_signal(ClientDraft::default);
    let mut original = use_signal(ClientDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let data = use_resource(move || async move { server::api::get_client(id).await });

    use_effect(move || {
        if let Some(Ok(client)) = &*data.read() {
            let loaded = ClientDraft::from_client(client);
            original.set(loaded.clone());
            draft.set(loaded);
        }
    });

    let handle_save = move |_: FormEvent| {
        let patch = draft.read().changes_from(&original.read());
        spawn(async move {
            saving.set(true);
            errors.set(HashMap::new());
            match server::api::update_client(id, patch).await {
                Ok(_) => {
                    toast.success("Client updated".to_string(), ToastOptions::new());
                    navigator().push(Route::ClientDetail { id });
                }
                Err(e) => {
                    let fe = AppError::parse_field_errors(&e.to_string());
                    if fe.is_empty() {
                        toast.error(error_message(&e), ToastOptions::new());
                    }
                    errors.set(fe);
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "Edit client" }
            }
            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(_)) => rsx! {
                            Form { onsubmit: handle_save,
                                ClientFields { draft, errors: errors(), busy: saving() }
                                FormActions {
                                    Link { to: Route::ClientDetail { id },
                                        Button { variant: ButtonVariant::Ghost, "Cancel" }
                                    }
                                    Button {
                                        variant: ButtonVariant::Primary,
                                        button_type: "submit",
                                        loading: saving(),
                                        "Save changes"
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "error-text", "{error_message(e)}" }
                        },
                        None => rsx! { SkeletonRows { count: 6 } },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_client_defaults_to_first_identifier_type() {
        assert_eq!(ClientDraft::default().official_identifier_type, "national_id");
    }

    #[test]
    fn create_request_trims_text() {
        let draft = ClientDraft {
            name: "  Thabo Nkosi ".into(),
            contact_email: "thabo@example.com ".into(),
            ..Default::default()
        };
        let req = draft.into_create();
        assert_eq!(req.name, "Thabo Nkosi");
        assert_eq!(req.contact_email, "thabo@example.com");
    }

    #[test]
    fn patch_only_carries_changed_fields() {
        let original = ClientDraft {
            name: "Thabo Nkosi".into(),
            preferred_name: "Thabo".into(),
            ..Default::default()
        };
        let mut edited = original.clone();
        edited.preferred_name = "TK".into();

        let patch = edited.changes_from(&original);
        assert_eq!(patch.preferred_name.as_deref(), Some("TK"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.official_identifier_type, None);
    }
}
