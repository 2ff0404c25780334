use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, HistoryRowView};

/// File extensions the service knows how to extract text from.
pub const SUPPORTED_UPLOAD_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

pub fn is_supported_upload(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_UPLOAD_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Bart,
    T5,
}

impl ModelKind {
    /// Identifier sent to the service.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Bart => "bart",
            ModelKind::T5 => "t5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Bart => "BART",
            ModelKind::T5 => "T5",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ModelKind::Bart => ModelKind::T5,
            ModelKind::T5 => ModelKind::Bart,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bart" => Some(ModelKind::Bart),
            "t5" => Some(ModelKind::T5),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub path: PathBuf,
}

impl Attachment {
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { filename, path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftInput {
    pub text: String,
    pub file: Option<Attachment>,
    pub model: ModelKind,
}

impl DraftInput {
    /// True when there is nothing to submit.
    pub fn is_blank(&self) -> bool {
        self.file.is_none() && self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
    pub model: ModelKind,
}

/// A summarization persisted by the service. Never edited locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub model: String,
    pub text: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Alert(String),
    ConfirmClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    draft: DraftInput,
    summary: Option<SummaryResult>,
    history: Vec<HistoryEntry>,
    status: RequestStatus,
    submitted_model: Option<ModelKind>,
    dialog: Option<Dialog>,
    path_prompt: Option<String>,
    status_line: Option<String>,
    focus: Focus,
    selected: usize,
    theme: Theme,
    spinner_frame: u8,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state with preferences applied (model and theme from configuration).
    pub fn with_preferences(model: ModelKind, theme: Theme) -> Self {
        Self {
            draft: DraftInput {
                model,
                ..DraftInput::default()
            },
            theme,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.is_pending();
        let error = match &self.status {
            RequestStatus::Failed(reason) => Some(reason.clone()),
            RequestStatus::Idle | RequestStatus::Pending => None,
        };
        AppViewModel {
            draft_text: self.draft.text.clone(),
            attached_file: self.draft.file.as_ref().map(|file| file.filename.clone()),
            model: self.draft.model,
            submitting: pending,
            submit_enabled: !pending,
            submit_label: if pending {
                crate::SUBMIT_LABEL_PENDING
            } else {
                crate::SUBMIT_LABEL
            },
            error,
            summary: self.summary.as_ref().map(|result| result.text.clone()),
            summary_model: self.summary.as_ref().map(|result| result.model),
            history: self
                .history
                .iter()
                .map(HistoryRowView::from_entry)
                .collect(),
            selected: self.selected_index(),
            can_clear_all: !self.history.is_empty(),
            dialog: self.dialog.clone(),
            path_prompt: self.path_prompt.clone(),
            status_line: self.status_line.clone(),
            focus: self.focus,
            theme: self.theme,
            spinner_frame: self.spinner_frame,
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is needed and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        self.summary.as_ref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn path_prompt(&self) -> Option<&str> {
        self.path_prompt.as_deref()
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.selected.min(self.history.len() - 1))
        }
    }

    pub(crate) fn draft_mut(&mut self) -> &mut DraftInput {
        self.dirty = true;
        &mut self.draft
    }

    pub(crate) fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
        self.spinner_frame = 0;
        self.dirty = true;
    }

    /// Marks a submission as in flight and remembers the model it was sent with.
    pub(crate) fn begin_request(&mut self, model: ModelKind) {
        self.submitted_model = Some(model);
        self.set_status(RequestStatus::Pending);
    }

    /// Model of the most recent submission, falling back to the current selection.
    pub(crate) fn submitted_model(&self) -> ModelKind {
        self.submitted_model.unwrap_or(self.draft.model)
    }

    pub(crate) fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.dirty = true;
    }

    pub(crate) fn set_summary(&mut self, summary: SummaryResult) {
        self.summary = Some(summary);
        self.dirty = true;
    }

    /// Replaces the cached history wholesale; the selection is clamped to the new list.
    pub(crate) fn replace_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
        self.selected = self.selected.min(self.history.len().saturating_sub(1));
        self.dirty = true;
    }

    pub(crate) fn find_history(&self, id: &str) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.id == id)
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        let current = self.selected.min(last);
        let next = current.saturating_add_signed(delta).min(last);
        if next != self.selected {
            self.selected = next;
            self.dirty = true;
        }
    }

    pub(crate) fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
        self.dirty = true;
    }

    pub(crate) fn close_dialog(&mut self) -> Option<Dialog> {
        self.dirty = true;
        self.dialog.take()
    }

    pub(crate) fn path_prompt_mut(&mut self) -> Option<&mut String> {
        self.dirty = true;
        self.path_prompt.as_mut()
    }

    pub(crate) fn open_path_prompt(&mut self) {
        self.path_prompt = Some(String::new());
        self.dirty = true;
    }

    pub(crate) fn take_path_prompt(&mut self) -> Option<String> {
        self.dirty = true;
        self.path_prompt.take()
    }

    pub(crate) fn set_status_line(&mut self, line: impl Into<String>) {
        self.status_line = Some(line.into());
        self.dirty = true;
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::History,
            Focus::History => Focus::Editor,
        };
        self.dirty = true;
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.dirty = true;
    }
}
