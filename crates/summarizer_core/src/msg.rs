use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view is shown for the first time.
    Mounted,
    /// Periodic tick; drives the pending-request spinner.
    Tick,
    /// A character typed into whichever text field has focus.
    CharTyped(char),
    /// Backspace in whichever text field has focus.
    Backspace,
    /// Bracketed paste into whichever text field has focus.
    Pasted(String),
    /// Switch focus between the editor and the history list.
    FocusToggled,
    ModelSelected(crate::ModelKind),
    ModelToggled,
    ThemeToggled,
    /// User asked to attach a document; opens the path prompt.
    AttachFileClicked,
    PathPromptSubmitted,
    PathPromptCancelled,
    /// A document path chosen outside the prompt (e.g. command line).
    FileChosen(PathBuf),
    FileCleared,
    SubmitClicked,
    /// The service answered `/summarize` with a success status.
    SummaryReceived { summary: Option<String> },
    /// `/summarize` failed at the transport level or with a non-success status.
    SummarizeFailed { reason: String },
    /// The attached document could not be read, so nothing was sent.
    AttachmentUnreadable { reason: String },
    HistoryLoaded(Vec<crate::HistoryEntry>),
    HistoryLoadFailed { reason: String },
    SelectPrevious,
    SelectNext,
    DeleteClicked { id: String },
    DeleteFinished {
        id: String,
        result: Result<(), String>,
    },
    ClearAllClicked,
    /// Answer to the clear-all confirmation dialog.
    ConfirmAnswered(bool),
    ClearFinished(Result<(), String>),
    DownloadCurrentClicked,
    DownloadHistoryClicked { id: String },
    /// Outcome of writing a download; `Ok` carries the written path.
    DownloadFinished(Result<PathBuf, String>),
    AlertDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
