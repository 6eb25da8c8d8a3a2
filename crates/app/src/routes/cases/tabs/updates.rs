use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{
    CaseUpdate, CaseUpdateRequest, LegalCaseState, MeetingDraft, MeetingUpdate, NoteUpdate,
    UpdateTab, FILE_UPLOAD_FAILED, NOTES_REQUIRED,
};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Choice,
    ChoiceList, DialogContent, DialogDescription, DialogRoot, DialogTitle, FieldError, Form,
    FormActions, Input, PageActions, SkeletonRows, TabContent, TabList, TabTrigger, Tabs,
    Textarea, UploadProgress,
};

use crate::components::meeting_form::{visible_errors, MeetingForm};
use crate::components::notice::{use_notice, NoticeBanner};
use crate::components::state_badge::StateSelect;
use crate::components::upload::{
    pick_file, progress_percent, upload_case_file, FileAttachment, PickedFile,
};
use crate::format_helpers::{error_message, format_datetime_human};
use crate::routes::Route;
use crate::timing::Expiring;

pub const FILES_REQUIRED: &str = "Select or upload at least one file";

/// Inputs behind the three tabs of the update dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateForm {
    pub note_title: String,
    pub note_content: String,
    pub meeting: MeetingDraft,
    pub files: Vec<i64>,
}

impl UpdateForm {
    pub fn new(now: chrono::NaiveDateTime) -> Self {
        Self {
            note_title: String::new(),
            note_content: String::new(),
            meeting: MeetingDraft::new(now),
            files: Vec::new(),
        }
    }

    /// Problems that block submitting `tab`. `has_upload` is true when a
    /// new file will be uploaded first.
    pub fn validate(&self, tab: UpdateTab, has_upload: bool) -> HashMap<String, String> {
        match tab {
            UpdateTab::Note => {
                let mut errors = HashMap::new();
                if self.note_title.trim().is_empty() && self.note_content.trim().is_empty() {
                    errors.insert("content".to_string(), NOTES_REQUIRED.to_string());
                }
                errors
            }
            UpdateTab::Meeting => visible_errors(&self.meeting, true),
            UpdateTab::File => {
                let mut errors = HashMap::new();
                if self.files.is_empty() && !has_upload {
                    errors.insert("files".to_string(), FILES_REQUIRED.to_string());
                }
                errors
            }
        }
    }

    /// Payload for `tab`, attaching the freshly uploaded file if any.
    /// `None` only when the meeting date cannot be parsed.
    pub fn request(
        &self,
        tab: UpdateTab,
        legal_case: i64,
        uploaded: Option<i64>,
    ) -> Option<CaseUpdateRequest> {
        match tab {
            UpdateTab::Note => Some(CaseUpdateRequest::note(
                legal_case,
                NoteUpdate {
                    title: self.note_title.trim().to_string(),
                    content: self.note_content.trim().to_string(),
                    file: uploaded,
                },
            )),
            UpdateTab::Meeting => {
                let meeting_date = self.meeting.parsed_date()?;
                Some(CaseUpdateRequest::meeting(
                    legal_case,
                    MeetingUpdate {
                        meeting_type: self.meeting.meeting_type.trim().to_string(),
                        location: self.meeting.location.trim().to_string(),
                        notes: self.meeting.notes.trim().to_string(),
                        meeting_date,
                        file: uploaded,
                    },
                ))
            }
            UpdateTab::File => {
                let mut files = self.files.clone();
                if let Some(id) = uploaded {
                    if !files.contains(&id) {
                        files.push(id);
                    }
                }
                Some(CaseUpdateRequest::files(legal_case, files))
            }
        }
    }
}

fn kind_variant(kind: &str) -> BadgeVariant {
    match kind {
        "meeting" => BadgeVariant::Primary,
        "files" => BadgeVariant::Secondary,
        _ => BadgeVariant::Outline,
    }
}

fn now_local() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Posts note, meeting and file updates to a case and lists the history.
/// Submitting can also move the case to a new state.
#[component]
pub fn CaseUpdateTab(
    legal_case: i64,
    state: LegalCaseState,
    on_state_change: EventHandler<LegalCaseState>,
) -> Element {
    let mut notice = use_notice();
    let mut show_dialog = use_signal(|| false);
    let mut active = use_signal(|| UpdateTab::Note);
    let mut form = use_signal(|| UpdateForm::new(now_local()));
    let mut next_state = use_signal(|| state);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut meeting_submitted = use_signal(|| false);
    let mut picked = use_signal(|| Option::<PickedFile>::None);
    let mut file_description = use_signal(String::new);
    let progress = use_signal(Expiring::<u8>::default);
    let mut saving = use_signal(|| false);

    let mut history = use_resource(move || async move {
        server::api::list_case_updates(legal_case).await
    });
    let mut case_files = use_resource(move || async move {
        server::api::list_case_files(legal_case).await.unwrap_or_default()
    });

    // The meeting tab edits its draft through its own signal.
    let mut meeting_draft = use_signal(|| MeetingDraft::new(now_local()));

    let mut reset = move || {
        form.set(UpdateForm::new(now_local()));
        meeting_draft.set(MeetingDraft::new(now_local()));
        errors.set(HashMap::new());
        meeting_submitted.set(false);
        picked.set(None);
        file_description.set(String::new());
    };

    let open_dialog = move |_| {
        reset();
        next_state.set(state);
        active.set(UpdateTab::Note);
        show_dialog.set(true);
    };

    let on_file = move |evt: FormEvent| async move {
        match pick_file(&evt).await {
            Ok(file) => picked.set(file),
            Err(e) => notice.error(e),
        }
    };

    let handle_submit = move |_: FormEvent| {
        let tab = active();
        let mut current = form.read().clone();
        current.meeting = meeting_draft.read().clone();
        if tab == UpdateTab::Meeting {
            meeting_submitted.set(true);
        }

        let pending = picked.read().clone();
        let local = current.validate(tab, pending.is_some());
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        errors.set(HashMap::new());

        let target_state = next_state();
        let description = file_description.read().trim().to_string();
        spawn(async move {
            saving.set(true);

            let mut uploaded = None;
            if let Some(file) = pending {
                match upload_case_file(legal_case, file, description, progress).await {
                    Ok(saved) => uploaded = Some(saved.id),
                    Err(e) => {
                        tracing::warn!(legal_case, error = %e, "case update upload failed");
                        notice.error(FILE_UPLOAD_FAILED);
                        saving.set(false);
                        return;
                    }
                }
            }

            let Some(body) = current.request(tab, legal_case, uploaded) else {
                notice.error(tab.failure_message());
                saving.set(false);
                return;
            };

            match server::api::create_case_update(body).await {
                Ok(_) => {
                    if target_state != state {
                        match server::api::set_legal_case_state(legal_case, target_state).await {
                            Ok(_) => on_state_change.call(target_state),
                            Err(e) => tracing::warn!(legal_case, error = %e, "state change failed"),
                        }
                    }
                    notice.success(tab.success_message());
                    show_dialog.set(false);
                    history.restart();
                    case_files.restart();
                }
                Err(e) => {
                    let fe = shared_types::AppError::parse_field_errors(&e.to_string());
                    if !fe.is_empty() {
                        errors.set(fe);
                    }
                    tracing::warn!(legal_case, error = %error_message(&e), "case update failed");
                    notice.error(tab.failure_message());
                }
            }
            saving.set(false);
        });
    };

    let f = form.read().clone();
    let errs = errors();
    let err = |field: &str| errs.get(field).cloned().unwrap_or_default();
    let file_choices: Vec<Choice> = case_files
        .read()
        .iter()
        .flatten()
        .map(|file| Choice { id: file.id, label: file.display_name() })
        .collect();
    let file_names: HashMap<i64, String> = case_files
        .read()
        .iter()
        .flatten()
        .map(|file| (file.id, file.display_name()))
        .collect();
    let picked_name = picked.read().as_ref().map(|p| p.name.clone());

    rsx! {
        NoticeBanner { notice }
        UploadProgress { percent: progress_percent(&progress), label: "Uploading file" }

        Card {
            CardHeader {
                CardTitle { "Case updates" }
                PageActions {
                    Button { variant: ButtonVariant::Primary, onclick: open_dialog, "New update" }
                }
            }
            CardContent {
                match &*history.read() {
                    Some(Ok(updates)) if updates.is_empty() => rsx! {
                        p { class: "empty-text", "No updates have been posted yet." }
                    },
                    Some(Ok(updates)) => rsx! {
                        ul { class: "update-history",
                            for u in updates.iter() {
                                UpdateEntry { key: "{u.id}", update: u.clone(), file_names: file_names.clone() }
                            }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        p { class: "error-text", "{error_message(e)}" }
                    },
                    None => rsx! { SkeletonRows { count: 3 } },
                }
            }
        }

        DialogRoot {
            open: show_dialog(),
            on_open_change: move |v| show_dialog.set(v),
            DialogContent {
                DialogTitle { "New case update" }
                DialogDescription { "Record a note, a meeting or new files against this case." }
                Form { onsubmit: handle_submit,
                    Tabs {
                        default_value: UpdateTab::Note.value(),
                        horizontal: true,
                        on_value_change: move |v: String| {
                            if let Some(tab) = UpdateTab::ALL.iter().find(|t| t.value() == v) {
                                active.set(*tab);
                                errors.set(HashMap::new());
                            }
                        },
                        TabList {
                            for (i, tab) in UpdateTab::ALL.iter().enumerate() {
                                TabTrigger { key: "{tab.value()}", value: tab.value(), index: i, "{tab.title()}" }
                            }
                        }
                        TabContent { value: UpdateTab::Note.value(), index: 0usize,
                            Input {
                                label: "Title",
                                value: f.note_title.clone(),
                                disabled: saving(),
                                on_input: move |e: FormEvent| form.write().note_title = e.value(),
                            }
                            Textarea {
                                label: "Note",
                                value: f.note_content.clone(),
                                rows: 5,
                                disabled: saving(),
                                error: err("content"),
                                on_input: move |e: FormEvent| form.write().note_content = e.value(),
                            }
                            FileAttachment {
                                description: file_description,
                                on_file: on_file,
                                file_name: picked_name.clone(),
                                disabled: saving(),
                            }
                        }
                        TabContent { value: UpdateTab::Meeting.value(), index: 1usize,
                            MeetingForm {
                                draft: meeting_draft,
                                submitted: meeting_submitted,
                                read_only: saving(),
                            }
                            FileAttachment {
                                description: file_description,
                                on_file: on_file,
                                file_name: picked_name.clone(),
                                disabled: saving(),
                            }
                        }
                        TabContent { value: UpdateTab::File.value(), index: 2usize,
                            ChoiceList {
                                label: "Existing files",
                                choices: file_choices,
                                selected: f.files.clone(),
                                error: err("files"),
                                on_change: move |ids| form.write().files = ids,
                            }
                            FileAttachment {
                                description: file_description,
                                on_file: on_file,
                                file_name: picked_name.clone(),
                                disabled: saving(),
                            }
                        }
                    }
                    StateSelect {
                        label: "Case status",
                        value: next_state(),
                        on_change: move |s| next_state.set(s),
                    }
                    FieldError { message: err("legal_case") }
                    FormActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| show_dialog.set(false),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            loading: saving(),
                            "Post update"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UpdateEntry(update: CaseUpdate, file_names: HashMap<i64, String>) -> Element {
    let files: Vec<String> = update
        .files
        .iter()
        .map(|id| file_names.get(id).cloned().unwrap_or_else(|| format!("File #{id}")))
        .collect();

    rsx! {
        li { class: "update-entry",
            div { class: "update-entry-head",
                Badge { variant: kind_variant(&update.kind), "{update.kind}" }
                span { class: "update-entry-date", "{format_datetime_human(&update.created_at)}" }
            }
            if !update.title.is_empty() {
                h4 { class: "update-entry-title", "{update.title}" }
            }
            if !update.content.is_empty() {
                p { class: "update-entry-content", "{update.content}" }
            }
            if let Some(meeting) = update.meeting {
                Link { to: Route::MeetingDetail { id: meeting }, "View meeting" }
            }
            if !files.is_empty() {
                p { class: "update-entry-files", "Files: {files.join(\", \")}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn form() -> UpdateForm {
        UpdateForm::new(
            NaiveDate::from_ymd_opt(2022, 2, 14)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
        )
    }

    #[test]
    fn blank_note_is_rejected() {
        let errors = form().validate(UpdateTab::Note, false);
        assert_eq!(errors.get("content").map(String::as_str), Some(NOTES_REQUIRED));
    }

    #[test]
    fn note_carries_uploaded_file() {
        let mut f = form();
        f.note_content = "Client called about hearing date".into();
        assert!(f.validate(UpdateTab::Note, false).is_empty());

        let req = f.request(UpdateTab::Note, 3, Some(42)).unwrap();
        let note = req.note.unwrap();
        assert_eq!(note.file, Some(42));
        assert_eq!(req.legal_case, 3);
    }

    #[test]
    fn file_tab_accepts_pending_upload_alone() {
        let f = form();
        assert_eq!(
            f.validate(UpdateTab::File, false).get("files").map(String::as_str),
            Some(FILES_REQUIRED)
        );
        assert!(f.validate(UpdateTab::File, true).is_empty());
    }

    #[test]
    fn file_tab_appends_upload_without_duplicates() {
        let mut f = form();
        f.files = vec![4, 2];
        let req = f.request(UpdateTab::File, 1, Some(2)).unwrap();
        assert_eq!(req.files, Some(vec![4, 2]));

        let req = f.request(UpdateTab::File, 1, Some(9)).unwrap();
        assert_eq!(req.files, Some(vec![4, 2, 9]));
    }

    #[test]
    fn meeting_tab_uses_form_rules() {
        let mut f = form();
        assert_eq!(f.validate(UpdateTab::Meeting, false).len(), 3);

        f.meeting.location = "Home visit".into();
        f.meeting.meeting_type = "Consultation".into();
        f.meeting.notes = "Reviewed lease".into();
        assert!(f.validate(UpdateTab::Meeting, false).is_empty());

        let req = f.request(UpdateTab::Meeting, 8, None).unwrap();
        let meeting = req.meeting.unwrap();
        assert_eq!(meeting.location, "Home visit");
        assert_eq!(meeting.meeting_date.format("%Y-%m-%d %H:%M").to_string(), "2022-02-14 10:15");
    }
}
