use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::MeetingDraft;
use shared_ui::{Input, Textarea};

/// Field errors to render for `draft`. Nothing is shown until the user
/// has tried to submit once; after that errors follow every keystroke.
pub fn visible_errors(draft: &MeetingDraft, submitted: bool) -> HashMap<String, String> {
    if !submitted {
        return HashMap::new();
    }
    let mut errors = draft.validate();
    if draft.parsed_date().is_none() {
        errors.insert("meeting_date".into(), "Enter a valid date and time".into());
    }
    errors
}

fn error_for(errors: &HashMap<String, String>, field: &str) -> String {
    errors.get(field).cloned().unwrap_or_default()
}

/// Meeting fields shared by the new-meeting page, the edit page and the
/// meeting tab of the case update dialog.
#[component]
pub fn MeetingForm(
    mut draft: Signal<MeetingDraft>,
    submitted: Signal<bool>,
    #[props(default = false)] read_only: bool,
) -> Element {
    let errors = visible_errors(&draft.read(), submitted());
    let current = draft.read().clone();

    rsx! {
        div { class: "meeting-form",
            Input {
                label: "Meeting type",
                value: current.meeting_type,
                placeholder: "e.g. Consultation",
                disabled: read_only,
                error: error_for(&errors, "meeting_type"),
                on_input: move |evt: FormEvent| draft.write().meeting_type = evt.value(),
            }
            Input {
                label: "Location",
                value: current.location,
                placeholder: "e.g. Office",
                disabled: read_only,
                error: error_for(&errors, "location"),
                on_input: move |evt: FormEvent| draft.write().location = evt.value(),
            }
            Input {
                label: "Meeting date",
                input_type: "datetime-local",
                value: current.meeting_date,
                disabled: read_only,
                error: error_for(&errors, "meeting_date"),
                on_input: move |evt: FormEvent| draft.write().meeting_date = evt.value(),
            }
            Textarea {
                label: "Notes",
                value: current.notes,
                rows: 6,
                disabled: read_only,
                error: error_for(&errors, "notes"),
                on_input: move |evt: FormEvent| draft.write().notes = evt.value(),
            }
        }
    }
}
