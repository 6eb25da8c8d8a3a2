use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{AppError, UpdateUserRequest, User};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, Form, FormActions, FormSelect, Input, PageHeader,
    PageTitle, SkeletonRows,
};
use shared_ui::{use_toast, ToastOptions};

use crate::auth::use_auth;
use crate::format_helpers::error_message;
use crate::routes::Route;

/// Editable profile fields. An empty `case_office` means unassigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub membership_number: String,
    pub case_office: String,
}

impl ProfileDraft {
    pub fn from_user(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            contact_number: u.contact_number.clone(),
            membership_number: u.membership_number.clone(),
            case_office: u.case_office.map(|o| o.to_string()).unwrap_or_default(),
        }
    }

    fn office(&self) -> Option<i64> {
        self.case_office.parse().ok()
    }

    /// Only fields that differ from `original`. Picking "Unassigned" sends
    /// an explicit null for the office.
    pub fn changes_from(&self, original: &User) -> UpdateUserRequest {
        fn changed(new: &str, old: &str) -> Option<String> {
            (new.trim() != old).then(|| new.trim().to_string())
        }
        let office = self.office();
        UpdateUserRequest {
            name: changed(&self.name, &original.name),
            email: changed(&self.email, &original.email),
            contact_number: changed(&self.contact_number, &original.contact_number),
            membership_number: changed(&self.membership_number, &original.membership_number),
            case_office: (office != original.case_office).then_some(office),
        }
    }
}

#[component]
pub fn UserEditPage(id: i64) -> Element {
    let toast = use_toast();
    let mut auth = use_auth();
    let mut draft = use_signal(ProfileDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let data = use_resource(move || async move { server::api::get_user(id).await });
    let offices = use_resource(|| async { server::api::list_case_offices().await.unwrap_or_default() });

    use_effect(move || {
        if let Some(Ok(user)) = &*data.read() {
            draft.set(ProfileDraft::from_user(user));
        }
    });

    if auth.user_id().is_some_and(|me| me != id) {
        return rsx! {
            div { class: "container narrow",
                p { class: "error-text", "You can only edit your own profile." }
                Link { to: Route::UserDetail { id },
                    Button { variant: ButtonVariant::Secondary, "Back to profile" }
                }
            }
        };
    }

    let handle_save = move |_: FormEvent| {
        let Some(Ok(original)) = data.read().clone() else {
            return;
        };
        let patch = draft.read().changes_from(&original);
        spawn(async move {
            saving.set(true);
            errors.set(HashMap::new());
            match server::api::update_user(id, patch).await {
                Ok(user) => {
                    let signed_in = auth.current_user.read().clone();
                    if let Some(mut current) = signed_in {
                        current.name = user.name.clone();
                        current.email = user.email.clone();
                        current.case_office = user.case_office;
                        auth.set_user(current);
                    }
                    toast.success("Profile updated".to_string(), ToastOptions::new());
                    navigator().push(Route::UserDetail { id });
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

    let d = draft.read().clone();
    let err = |field: &str| errors.read().get(field).cloned().unwrap_or_default();
    let busy = saving();

    rsx! {
        div { class: "container narrow",
            PageHeader {
                PageTitle { "Edit profile" }
            }
            Card {
                CardContent {
                    match &*data.read() {
                        Some(Ok(_)) => rsx! {
                            Form { onsubmit: handle_save,
                                Input {
                                    label: "Name",
                                    value: d.name.clone(),
                                    disabled: busy,
                                    error: err("name"),
                                    on_input: move |e: FormEvent| draft.write().name = e.value(),
                                }
                                Input {
                                    label: "Email",
                                    input_type: "email",
                                    value: d.email.clone(),
                                    disabled: busy,
                                    error: err("email"),
                                    on_input: move |e: FormEvent| draft.write().email = e.value(),
                                }
                                Input {
                                    label: "Contact number",
                                    input_type: "tel",
                                    value: d.contact_number.clone(),
                                    disabled: busy,
                                    on_input: move |e: FormEvent| draft.write().contact_number = e.value(),
                                }
                                Input {
                                    label: "Membership number",
                                    value: d.membership_number.clone(),
                                    disabled: busy,
                                    on_input: move |e: FormEvent| draft.write().membership_number = e.value(),
                                }
                                FormSelect {
                                    label: "Case office",
                                    value: d.case_office.clone(),
                                    disabled: busy,
                                    error: err("case_office"),
                                    onchange: move |e: Event<FormData>| draft.write().case_office = e.value(),
                                    option { value: "", selected: d.case_office.is_empty(), "Unassigned" }
                                    for office in offices.read().clone().unwrap_or_default() {
                                        option {
                                            key: "{office.id}",
                                            value: "{office.id}",
                                            selected: d.case_office == office.id.to_string(),
                                            "{office.name}"
                                        }
                                    }
                                }
                                FormActions {
                                    Link { to: Route::UserDetail { id },
                                        Button { variant: ButtonVariant::Ghost, "Cancel" }
                                    }
                                    Button {
                                        variant: ButtonVariant::Primary,
                                        button_type: "submit",
                                        loading: busy,
                                        "Save profile"
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "error-text", "{error_message(e)}" }
                        },
                        None => rsx! { SkeletonRows { count: 4 } },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: 2,
            username: "jdoe".into(),
            name: "Jane Doe".into(),
            membership_number: "M-1".into(),
            contact_number: "555".into(),
            email: "jane@example.com".into(),
            case_office: Some(4),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn untouched_profile_sends_nothing() {
        let u = user();
        assert_eq!(ProfileDraft::from_user(&u).changes_from(&u), UpdateUserRequest::default());
    }

    #[test]
    fn clearing_office_sends_explicit_null() {
        let u = user();
        let mut draft = ProfileDraft::from_user(&u);
        draft.case_office.clear();
        draft.email = " new@example.com ".into();

        let patch = draft.changes_from(&u);
        assert_eq!(patch.case_office, Some(None));
        assert_eq!(patch.email.as_deref(), Some("new@example.com"));
        assert_eq!(patch.name, None);
    }
}
