//! Summarizer core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SummarizeRequest};
pub use msg::Msg;
pub use state::{
    is_supported_upload, AppState, Attachment, Dialog, DraftInput, Focus, HistoryEntry,
    ModelKind, RequestStatus, SummaryResult, Theme, SUPPORTED_UPLOAD_EXTENSIONS,
};
pub use update::{
    update, CLEAR_FAILED, DELETE_FAILED, FILE_UNREADABLE, NOTHING_TO_DOWNLOAD, NO_SUMMARY_RECEIVED,
    SERVER_ERROR, UNSUPPORTED_FILE, VALIDATION_EMPTY_INPUT,
};
pub use view_model::{
    text_preview, AppViewModel, HistoryRowView, PREVIEW_CHARS, SUBMIT_LABEL, SUBMIT_LABEL_PENDING,
};
