use crate::{Dialog, Focus, HistoryEntry, ModelKind, Theme};

/// Number of characters of the original text shown per history row.
pub const PREVIEW_CHARS: usize = 150;

pub const SUBMIT_LABEL: &str = "Summarize";
pub const SUBMIT_LABEL_PENDING: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub draft_text: String,
    pub attached_file: Option<String>,
    pub model: ModelKind,
    pub submitting: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub summary: Option<String>,
    pub summary_model: Option<ModelKind>,
    pub history: Vec<HistoryRowView>,
    pub selected: Option<usize>,
    pub can_clear_all: bool,
    pub dialog: Option<Dialog>,
    pub path_prompt: Option<String>,
    pub status_line: Option<String>,
    pub focus: Focus,
    pub theme: Theme,
    pub spinner_frame: u8,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn selected_row(&self) -> Option<&HistoryRowView> {
        self.selected.and_then(|index| self.history.get(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub model_label: String,
    pub text_preview: String,
    pub summary: String,
}

impl HistoryRowView {
    pub(crate) fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            model_label: entry.model.to_uppercase(),
            text_preview: text_preview(&entry.text),
            summary: entry.summary.clone(),
        }
    }
}

/// First [`PREVIEW_CHARS`] characters followed by an ellipsis.
///
/// The ellipsis is always appended, even for short texts.
pub fn text_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
