use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    is_supported_upload, AppState, Attachment, Dialog, Effect, Focus, Msg, RequestStatus,
    SummarizeRequest, SummaryResult,
};

pub const VALIDATION_EMPTY_INPUT: &str = "Please enter text or upload a file!";
pub const NO_SUMMARY_RECEIVED: &str = "No summary received!";
pub const SERVER_ERROR: &str = "Server error! Is the summarization service running?";
pub const DELETE_FAILED: &str = "Delete failed!";
pub const CLEAR_FAILED: &str = "Clear failed!";
pub const NOTHING_TO_DOWNLOAD: &str = "No summary to download!";
pub const FILE_UNREADABLE: &str = "Could not read the attached file!";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type. Use .pdf, .docx or .txt.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.dialog().is_some() && is_blocked_by_dialog(&msg) {
        return (state, Vec::new());
    }
    if state.path_prompt().is_some() {
        if let Some(effects) = update_path_prompt(&mut state, &msg) {
            return (state, effects);
        }
    }

    let effects = match msg {
        Msg::Mounted => vec![Effect::LoadHistory],
        Msg::Tick => {
            if state.is_pending() {
                state.advance_spinner();
            }
            Vec::new()
        }
        Msg::CharTyped(c) => {
            if state.focus() == Focus::Editor {
                state.draft_mut().text.push(c);
            }
            Vec::new()
        }
        Msg::Backspace => {
            if state.focus() == Focus::Editor && !state.draft().text.is_empty() {
                state.draft_mut().text.pop();
            }
            Vec::new()
        }
        Msg::Pasted(text) => {
            if state.focus() == Focus::Editor {
                state.draft_mut().text.push_str(&text);
            }
            Vec::new()
        }
        Msg::FocusToggled => {
            state.toggle_focus();
            Vec::new()
        }
        Msg::ModelSelected(model) => {
            if state.draft().model != model {
                state.draft_mut().model = model;
            }
            Vec::new()
        }
        Msg::ModelToggled => {
            let next = state.draft().model.toggled();
            state.draft_mut().model = next;
            Vec::new()
        }
        Msg::ThemeToggled => {
            state.toggle_theme();
            Vec::new()
        }
        Msg::AttachFileClicked => {
            state.open_path_prompt();
            Vec::new()
        }
        // Only meaningful while the prompt is open, handled above.
        Msg::PathPromptSubmitted | Msg::PathPromptCancelled => Vec::new(),
        Msg::FileChosen(path) => {
            attach_file(&mut state, path);
            Vec::new()
        }
        Msg::FileCleared => {
            if state.draft().file.is_some() {
                state.draft_mut().file = None;
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SummaryReceived { summary } => {
            if !state.is_pending() {
                engine_warn!("Ignoring summary that arrived with no request in flight");
                return (state, Vec::new());
            }
            match summary.filter(|text| !text.trim().is_empty()) {
                Some(text) => {
                    let model = state.submitted_model();
                    state.set_summary(SummaryResult { text, model });
                    let draft = state.draft_mut();
                    draft.text.clear();
                    draft.file = None;
                    state.set_status(RequestStatus::Idle);
                    vec![Effect::LoadHistory]
                }
                None => {
                    state.set_status(RequestStatus::Failed(NO_SUMMARY_RECEIVED.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::SummarizeFailed { reason } => {
            if !state.is_pending() {
                engine_warn!("Ignoring summarize failure with no request in flight: {reason}");
                return (state, Vec::new());
            }
            engine_warn!("Summarize failed: {reason}");
            state.set_status(RequestStatus::Failed(SERVER_ERROR.to_string()));
            Vec::new()
        }
        Msg::AttachmentUnreadable { reason } => {
            if !state.is_pending() {
                return (state, Vec::new());
            }
            engine_warn!("Attached file could not be read: {reason}");
            state.set_status(RequestStatus::Failed(FILE_UNREADABLE.to_string()));
            Vec::new()
        }
        Msg::HistoryLoaded(entries) => {
            engine_debug!("History refreshed with {} entries", entries.len());
            state.replace_history(entries);
            Vec::new()
        }
        Msg::HistoryLoadFailed { reason } => {
            // Background refresh; the previous list stays on screen.
            engine_warn!("Failed to load history: {reason}");
            Vec::new()
        }
        Msg::SelectPrevious => {
            state.move_selection(-1);
            Vec::new()
        }
        Msg::SelectNext => {
            state.move_selection(1);
            Vec::new()
        }
        Msg::DeleteClicked { id } => vec![Effect::DeleteEntry { id }],
        Msg::DeleteFinished { id, result } => match result {
            Ok(()) => {
                engine_info!("Deleted history entry {id}");
                vec![Effect::LoadHistory]
            }
            Err(reason) => {
                engine_warn!("Delete of history entry {id} failed: {reason}");
                state.open_dialog(Dialog::Alert(DELETE_FAILED.to_string()));
                Vec::new()
            }
        },
        Msg::ClearAllClicked => {
            if !state.history().is_empty() {
                state.open_dialog(Dialog::ConfirmClearAll);
            }
            Vec::new()
        }
        Msg::ConfirmAnswered(accepted) => match state.dialog() {
            Some(Dialog::ConfirmClearAll) => {
                state.close_dialog();
                if accepted {
                    vec![Effect::ClearHistory]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        },
        Msg::ClearFinished(result) => match result {
            Ok(()) => {
                engine_info!("History cleared");
                vec![Effect::LoadHistory]
            }
            Err(reason) => {
                engine_warn!("Clearing history failed: {reason}");
                state.open_dialog(Dialog::Alert(CLEAR_FAILED.to_string()));
                Vec::new()
            }
        },
        Msg::DownloadCurrentClicked => {
            let content = state
                .summary()
                .map(|result| (result.text.clone(), result.model.as_str().to_string()));
            download(&mut state, content)
        }
        Msg::DownloadHistoryClicked { id } => {
            let content = state
                .find_history(&id)
                .map(|entry| (entry.summary.clone(), entry.model.clone()));
            download(&mut state, content)
        }
        Msg::DownloadFinished(result) => {
            match result {
                Ok(path) => state.set_status_line(format!("Saved {}", path.display())),
                Err(reason) => state.set_status_line(format!("Download failed: {reason}")),
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            if matches!(state.dialog(), Some(Dialog::Alert(_))) {
                state.close_dialog();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// User interactions are held back while a modal dialog is open; service
/// results keep flowing so the state stays in sync.
fn is_blocked_by_dialog(msg: &Msg) -> bool {
    !matches!(
        msg,
        Msg::AlertDismissed
            | Msg::ConfirmAnswered(_)
            | Msg::Tick
            | Msg::NoOp
            | Msg::SummaryReceived { .. }
            | Msg::SummarizeFailed { .. }
            | Msg::AttachmentUnreadable { .. }
            | Msg::HistoryLoaded(_)
            | Msg::HistoryLoadFailed { .. }
            | Msg::DeleteFinished { .. }
            | Msg::ClearFinished(_)
            | Msg::DownloadFinished(_)
    )
}

/// Routes input to the open path prompt. Returns `None` for messages the
/// prompt does not consume.
fn update_path_prompt(state: &mut AppState, msg: &Msg) -> Option<Vec<Effect>> {
    match msg {
        Msg::CharTyped(c) => {
            if let Some(prompt) = state.path_prompt_mut() {
                prompt.push(*c);
            }
        }
        Msg::Backspace => {
            if let Some(prompt) = state.path_prompt_mut() {
                prompt.pop();
            }
        }
        Msg::Pasted(text) => {
            if let Some(prompt) = state.path_prompt_mut() {
                prompt.push_str(text.trim_end_matches(['\r', '\n']));
            }
        }
        Msg::PathPromptSubmitted => {
            let raw = state.take_path_prompt().unwrap_or_default();
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                attach_file(state, PathBuf::from(trimmed));
            }
        }
        Msg::PathPromptCancelled => {
            state.take_path_prompt();
        }
        // Other interactions wait until the prompt is closed.
        Msg::FocusToggled
        | Msg::ModelSelected(_)
        | Msg::ModelToggled
        | Msg::ThemeToggled
        | Msg::AttachFileClicked
        | Msg::FileCleared
        | Msg::SubmitClicked
        | Msg::SelectPrevious
        | Msg::SelectNext
        | Msg::DeleteClicked { .. }
        | Msg::ClearAllClicked
        | Msg::DownloadCurrentClicked
        | Msg::DownloadHistoryClicked { .. } => {}
        _ => return None,
    }
    Some(Vec::new())
}

fn attach_file(state: &mut AppState, path: PathBuf) {
    if !is_supported_upload(&path) {
        engine_info!("Rejected attachment {:?}: unsupported extension", path);
        state.open_dialog(Dialog::Alert(UNSUPPORTED_FILE.to_string()));
        return;
    }
    state.draft_mut().file = Some(Attachment::from_path(path));
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.is_pending() {
        return Vec::new();
    }
    if state.draft().is_blank() {
        state.open_dialog(Dialog::Alert(VALIDATION_EMPTY_INPUT.to_string()));
        return Vec::new();
    }

    let draft = state.draft();
    let request = match &draft.file {
        Some(attachment) => SummarizeRequest::File {
            attachment: attachment.clone(),
            model: draft.model,
        },
        None => SummarizeRequest::Text {
            text: draft.text.clone(),
            model: draft.model,
        },
    };
    state.begin_request(request.model());
    vec![Effect::Summarize(request)]
}

fn download(state: &mut AppState, content: Option<(String, String)>) -> Vec<Effect> {
    match content {
        Some((summary, model)) if !summary.is_empty() => {
            let model = Some(model).filter(|name| !name.trim().is_empty());
            vec![Effect::Download { model, summary }]
        }
        _ => {
            state.open_dialog(Dialog::Alert(NOTHING_TO_DOWNLOAD.to_string()));
            Vec::new()
        }
    }
}
