use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use summarizer_core::{update, AppState, Dialog, Effect, HistoryEntry, Msg, NOTHING_TO_DOWNLOAD};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn summarized(summary: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Pasted("input".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    update(
        state,
        Msg::SummaryReceived {
            summary: Some(summary.to_string()),
        },
    )
    .0
}

#[test]
fn download_without_summary_alerts_and_writes_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::DownloadCurrentClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.dialog(),
        Some(&Dialog::Alert(NOTHING_TO_DOWNLOAD.to_string()))
    );
}

#[test]
fn download_current_summary_carries_model_used() {
    init_logging();
    let state = summarized("Hi.");
    let (_state, effects) = update(state, Msg::DownloadCurrentClicked);

    assert_eq!(
        effects,
        vec![Effect::Download {
            model: Some("bart".to_string()),
            summary: "Hi.".to_string(),
        }]
    );
}

#[test]
fn download_history_entry_uses_entry_model() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::HistoryLoaded(vec![HistoryEntry {
            id: "7".to_string(),
            model: "t5".to_string(),
            text: "orig".to_string(),
            summary: "short".to_string(),
        }]),
    );

    let (_state, effects) = update(
        state,
        Msg::DownloadHistoryClicked {
            id: "7".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Download {
            model: Some("t5".to_string()),
            summary: "short".to_string(),
        }]
    );
}

#[test]
fn download_of_empty_history_summary_alerts() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::HistoryLoaded(vec![HistoryEntry {
            id: "7".to_string(),
            model: String::new(),
            text: "orig".to_string(),
            summary: String::new(),
        }]),
    );

    let (state, effects) = update(
        state,
        Msg::DownloadHistoryClicked {
            id: "7".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(matches!(state.dialog(), Some(Dialog::Alert(_))));

    let (state, _) = update(state, Msg::AlertDismissed);
    let (_state, effects) = update(
        state,
        Msg::DownloadHistoryClicked {
            id: "missing".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn download_outcome_is_reported_on_status_line() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DownloadFinished(Ok(PathBuf::from("out/summary_bart.txt"))),
    );
    assert_eq!(
        state.view().status_line.as_deref(),
        Some("Saved out/summary_bart.txt")
    );

    let (state, _) = update(state, Msg::DownloadFinished(Err("disk full".to_string())));
    assert_eq!(
        state.view().status_line.as_deref(),
        Some("Download failed: disk full")
    );
}
