use dioxus::prelude::*;

/// Native `<select>` for forms and filters.
///
/// Children should be `option { value: "...", "Label" }` elements.
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: Option<EventHandler<Event<FormData>>>,
    #[props(default)] label: String,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: String,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value: value,
                disabled: disabled,
                "aria-invalid": !error.is_empty(),
                onchange: move |evt| {
                    if let Some(handler) = &onchange {
                        handler.call(evt);
                    }
                },
                {children}
            }
            crate::FieldError { message: error }
        }
    }
}

/// One entry in a [`ChoiceList`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// Checkbox list for picking several ids, in the order they were ticked.
#[component]
pub fn ChoiceList(
    label: String,
    choices: Vec<Choice>,
    selected: Vec<i64>,
    on_change: EventHandler<Vec<i64>>,
    #[props(default)] error: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        fieldset { class: "choice-list",
            legend { class: "form-select-label", "{label}" }
            for choice in choices {
                {
                    let checked = selected.contains(&choice.id);
                    let current = selected.clone();
                    rsx! {
                        label { key: "{choice.id}", class: "choice-list-item",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onchange: move |_| on_change.call(toggle_choice(&current, choice.id)),
                            }
                            span { "{choice.label}" }
                        }
                    }
                }
            }
            crate::FieldError { message: error }
        }
    }
}

/// Add `id` to the end of `selected`, or remove it when already present.
pub fn toggle_choice(selected: &[i64], id: i64) -> Vec<i64> {
    if selected.contains(&id) {
        selected.iter().copied().filter(|s| *s != id).collect()
    } else {
        let mut next = selected.to_vec();
        next.push(id);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_keeps_pick_order() {
        let picked = toggle_choice(&[], 3);
        let picked = toggle_choice(&picked, 1);
        assert_eq!(picked, vec![3, 1]);
        assert_eq!(toggle_choice(&picked, 3), vec![1]);
    }
}
