use crate::{Attachment, ModelKind};

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadHistory,
    Summarize(SummarizeRequest),
    DeleteEntry { id: String },
    ClearHistory,
    Download {
        model: Option<String>,
        summary: String,
    },
}

/// A submission is either text or a file, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeRequest {
    Text { text: String, model: ModelKind },
    File {
        attachment: Attachment,
        model: ModelKind,
    },
}

impl SummarizeRequest {
    pub fn model(&self) -> ModelKind {
        match self {
            SummarizeRequest::Text { model, .. } | SummarizeRequest::File { model, .. } => *model,
        }
    }
}
