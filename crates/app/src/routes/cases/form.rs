use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{
    CreateLegalCaseRequest, LegalCase, LegalCaseState, UpdateLegalCaseRequest,
};
use shared_ui::components::{
    Button, ButtonVariant, Choice, ChoiceList, DialogContent, DialogDescription, DialogRoot,
    DialogTitle, Form, FormActions, Textarea,
};

use crate::components::state_badge::StateSelect;

pub const OFFICE_REQUIRED: &str = "Select at least one case office";

/// Editable legal case fields. The first office issues the case number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseDraft {
    pub summary: String,
    pub state: LegalCaseState,
    pub case_offices: Vec<i64>,
    pub case_types: Vec<i64>,
    pub users: Vec<i64>,
}

impl CaseDraft {
    /// Blank case preassigned to the creating officer and their office.
    pub fn for_officer(user: Option<i64>, office: Option<i64>) -> Self {
        Self {
            users: user.into_iter().collect(),
            case_offices: office.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn from_case(c: &LegalCase) -> Self {
        Self {
            summary: c.summary.clone(),
            state: c.state,
            case_offices: c.case_offices.clone(),
            case_types: c.case_types.clone(),
            users: c.users.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        if self.case_offices.is_empty() {
            errors.insert("case_offices".to_string(), OFFICE_REQUIRED.to_string());
        }
        errors
    }

    pub fn into_create(self, client: i64) -> CreateLegalCaseRequest {
        CreateLegalCaseRequest {
            client,
            state: self.state,
            summary: self.summary.trim().to_string(),
            users: self.users,
            case_types: self.case_types,
            case_offices: self.case_offices,
        }
    }

    pub fn changes_from(&self, original: &LegalCase) -> UpdateLegalCaseRequest {
        UpdateLegalCaseRequest {
            state: (self.state != original.state).then_some(self.state),
            summary: (self.summary.trim() != original.summary).then(|| self.summary.trim().to_string()),
            users: (self.users != original.users).then(|| self.users.clone()),
            case_types: (self.case_types != original.case_types).then(|| self.case_types.clone()),
            case_offices: (self.case_offices != original.case_offices)
                .then(|| self.case_offices.clone()),
        }
    }
}

/// Dialog for opening a case or editing its details. The caller owns the
/// draft and resets it before opening.
#[component]
pub fn CaseFormDialog(
    open: bool,
    on_open_change: EventHandler<bool>,
    title: String,
    mut draft: Signal<CaseDraft>,
    errors: HashMap<String, String>,
    busy: bool,
    submit_label: String,
    on_submit: EventHandler<()>,
) -> Element {
    let offices = use_resource(|| async { server::api::list_case_offices().await.unwrap_or_default() });
    let case_types = use_resource(|| async { server::api::list_case_types().await.unwrap_or_default() });
    let users = use_resource(|| async { server::api::list_users().await.unwrap_or_default() });

    let office_choices: Vec<Choice> = offices
        .read()
        .iter()
        .flatten()
        .map(|o| Choice { id: o.id, label: format!("{} ({})", o.name, o.case_office_code) })
        .collect();
    let type_choices: Vec<Choice> = case_types
        .read()
        .iter()
        .flatten()
        .map(|t| Choice { id: t.id, label: t.title.clone() })
        .collect();
    let user_choices: Vec<Choice> = users
        .read()
        .iter()
        .flatten()
        .map(|u| Choice {
            id: u.id,
            label: if u.name.is_empty() { u.username.clone() } else { u.name.clone() },
        })
        .collect();

    let d = draft.read().clone();
    let err = |field: &str| errors.get(field).cloned().unwrap_or_default();

    rsx! {
        DialogRoot {
            open: open,
            on_open_change: move |v| on_open_change.call(v),
            DialogContent {
                DialogTitle { "{title}" }
                DialogDescription { "Offices, case types and officers can be changed later." }
                Form { onsubmit: move |_| on_submit.call(()),
                    Textarea {
                        label: "Summary",
                        value: d.summary,
                        rows: 4,
                        disabled: busy,
                        error: err("summary"),
                        on_input: move |e: FormEvent| draft.write().summary = e.value(),
                    }
                    StateSelect {
                        value: d.state,
                        on_change: move |s| draft.write().state = s,
                    }
                    ChoiceList {
                        label: "Case offices",
                        choices: office_choices,
                        selected: d.case_offices,
                        error: err("case_offices"),
                        on_change: move |ids| draft.write().case_offices = ids,
                    }
                    ChoiceList {
                        label: "Case types",
                        choices: type_choices,
                        selected: d.case_types,
                        on_change: move |ids| draft.write().case_types = ids,
                    }
                    ChoiceList {
                        label: "Case officers",
                        choices: user_choices,
                        selected: d.users,
                        on_change: move |ids| draft.write().users = ids,
                    }
                    FormActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| on_open_change.call(false),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            loading: busy,
                            "{submit_label}"
                        }
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
    use pretty_assertions::assert_eq;

    fn case() -> LegalCase {
        LegalCase {
            id: 5,
            case_number: "JHB/2201/0005".into(),
            state: LegalCaseState::Opened,
            client: 2,
            summary: "Eviction notice".into(),
            users: vec![1],
            case_types: vec![3],
            case_offices: vec![1],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn officer_defaults_are_preselected() {
        let draft = CaseDraft::for_officer(Some(4), Some(2));
        assert_eq!(draft.users, vec![4]);
        assert_eq!(draft.case_offices, vec![2]);
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn case_needs_an_office() {
        let errors = CaseDraft::for_officer(Some(4), None).validate();
        assert_eq!(errors.get("case_offices").map(String::as_str), Some(OFFICE_REQUIRED));
    }

    #[test]
    fn edit_patch_only_carries_changes() {
        let original = case();
        let mut draft = CaseDraft::from_case(&original);
        draft.state = LegalCaseState::Referred;
        draft.users.push(7);

        let patch = draft.changes_from(&original);
        assert_eq!(patch.state, Some(LegalCaseState::Referred));
        assert_eq!(patch.users, Some(vec![1, 7]));
        assert_eq!(patch.summary, None);
        assert_eq!(patch.case_offices, None);
    }
}
