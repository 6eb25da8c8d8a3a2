use dioxus::prelude::*;
use shared_types::LegalCaseState;
use shared_ui::{Badge, BadgeVariant};

fn variant_for(state: LegalCaseState) -> BadgeVariant {
    match state {
        LegalCaseState::Opened | LegalCaseState::InProgress => BadgeVariant::Primary,
        LegalCaseState::Resolved | LegalCaseState::Closed => BadgeVariant::Success,
        LegalCaseState::Escalated => BadgeVariant::Destructive,
        LegalCaseState::Hanging | LegalCaseState::Pending => BadgeVariant::Warning,
        LegalCaseState::Referred => BadgeVariant::Secondary,
    }
}

#[component]
pub fn StateBadge(state: LegalCaseState) -> Element {
    rsx! {
        Badge { variant: variant_for(state), "{state.label()}" }
    }
}

/// `<select>` over every case state.
#[component]
pub fn StateSelect(
    value: LegalCaseState,
    on_change: EventHandler<LegalCaseState>,
    #[props(default = "Status".to_string())] label: String,
) -> Element {
    rsx! {
        shared_ui::FormSelect {
            label: label,
            value: value.as_str().to_string(),
            onchange: move |evt: Event<FormData>| {
                if let Some(state) = LegalCaseState::parse(&evt.value()) {
                    on_change.call(state);
                }
            },
            for state in shared_types::LEGAL_CASE_STATES.iter() {
                option {
                    key: "{state.as_str()}",
                    value: state.as_str(),
                    selected: *state == value,
                    "{state.label()}"
                }
            }
        }
    }
}
