use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use summarizer_core::{AppViewModel, Dialog, Focus, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Dispatch(Msg),
}

/// Key bindings shown in the footer.
pub const HELP: &str = "Tab focus | F2 model | F3 attach | F4 detach | F5 summarize | \
                        F6 download | F7 theme | Ctrl+C quit";
pub const HISTORY_HELP: &str = "Up/Down select | s download | d delete | c clear all";

/// Translates a terminal event into an action for the current view.
pub fn map_event(view: &AppViewModel, event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(view, key),
        Event::Paste(text) => {
            let accepts_text = view.path_prompt.is_some()
                || (view.dialog.is_none() && view.focus == Focus::Editor);
            accepts_text.then(|| Action::Dispatch(Msg::Pasted(text.clone())))
        }
        _ => None,
    }
}

fn map_key(view: &AppViewModel, key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Some(Action::Quit);
    }

    if let Some(dialog) = &view.dialog {
        return map_dialog_key(dialog, key).map(Action::Dispatch);
    }
    if view.path_prompt.is_some() {
        return map_prompt_key(key, ctrl).map(Action::Dispatch);
    }
    if let Some(msg) = map_global_key(key, ctrl) {
        return Some(Action::Dispatch(msg));
    }

    match view.focus {
        Focus::Editor => map_editor_key(key, ctrl),
        Focus::History => map_history_key(view, key),
    }
}

fn map_dialog_key(dialog: &Dialog, key: &KeyEvent) -> Option<Msg> {
    match dialog {
        Dialog::Alert(_) => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Msg::AlertDismissed),
            _ => None,
        },
        Dialog::ConfirmClearAll => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Msg::ConfirmAnswered(true))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Msg::ConfirmAnswered(false))
            }
            _ => None,
        },
    }
}

fn map_prompt_key(key: &KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Enter => Some(Msg::PathPromptSubmitted),
        KeyCode::Esc => Some(Msg::PathPromptCancelled),
        KeyCode::Backspace => Some(Msg::Backspace),
        KeyCode::Char(c) if !ctrl => Some(Msg::CharTyped(c)),
        _ => None,
    }
}

fn map_global_key(key: &KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => Some(Msg::FocusToggled),
        KeyCode::F(2) => Some(Msg::ModelToggled),
        KeyCode::F(3) => Some(Msg::AttachFileClicked),
        KeyCode::F(4) => Some(Msg::FileCleared),
        KeyCode::F(5) => Some(Msg::SubmitClicked),
        KeyCode::F(6) => Some(Msg::DownloadCurrentClicked),
        KeyCode::F(7) => Some(Msg::ThemeToggled),
        KeyCode::Char('s') if ctrl => Some(Msg::SubmitClicked),
        KeyCode::Char('o') if ctrl => Some(Msg::AttachFileClicked),
        KeyCode::Char('t') if ctrl => Some(Msg::ModelToggled),
        _ => None,
    }
}

fn map_editor_key(key: &KeyEvent, ctrl: bool) -> Option<Action> {
    let msg = match key.code {
        KeyCode::Enter => Msg::CharTyped('\n'),
        KeyCode::Backspace => Msg::Backspace,
        KeyCode::Char(c) if !ctrl => Msg::CharTyped(c),
        _ => return None,
    };
    Some(Action::Dispatch(msg))
}

fn map_history_key(view: &AppViewModel, key: &KeyEvent) -> Option<Action> {
    let selected_id = || view.selected_row().map(|row| row.id.clone());
    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Msg::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Msg::SelectNext,
        KeyCode::Delete | KeyCode::Char('d') => Msg::DeleteClicked { id: selected_id()? },
        KeyCode::Char('s') => Msg::DownloadHistoryClicked { id: selected_id()? },
        KeyCode::Char('c') => Msg::ClearAllClicked,
        KeyCode::Char('q') => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Dispatch(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_core::{update, AppState, HistoryEntry};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn history_view() -> AppViewModel {
        let (state, _) = update(
            AppState::new(),
            Msg::HistoryLoaded(vec![HistoryEntry {
                id: "42".to_string(),
                model: "bart".to_string(),
                text: "t".to_string(),
                summary: "s".to_string(),
            }]),
        );
        let (state, _) = update(state, Msg::FocusToggled);
        state.view()
    }

    #[test]
    fn editor_keys_edit_draft() {
        let view = AppState::new().view();
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('a'))),
            Some(Action::Dispatch(Msg::CharTyped('a')))
        );
        assert_eq!(
            map_event(&view, &press(KeyCode::Enter)),
            Some(Action::Dispatch(Msg::CharTyped('\n')))
        );
        assert_eq!(
            map_event(&view, &Event::Paste("pasted".to_string())),
            Some(Action::Dispatch(Msg::Pasted("pasted".to_string())))
        );
    }

    #[test]
    fn submit_and_quit_shortcuts() {
        let view = AppState::new().view();
        assert_eq!(
            map_event(&view, &press(KeyCode::F(5))),
            Some(Action::Dispatch(Msg::SubmitClicked))
        );
        assert_eq!(
            map_event(&view, &ctrl('s')),
            Some(Action::Dispatch(Msg::SubmitClicked))
        );
        assert_eq!(map_event(&view, &ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn history_keys_target_selected_entry() {
        let view = history_view();
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('d'))),
            Some(Action::Dispatch(Msg::DeleteClicked {
                id: "42".to_string()
            }))
        );
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('s'))),
            Some(Action::Dispatch(Msg::DownloadHistoryClicked {
                id: "42".to_string()
            }))
        );
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('c'))),
            Some(Action::Dispatch(Msg::ClearAllClicked))
        );
    }

    #[test]
    fn history_delete_without_rows_does_nothing() {
        let (state, _) = update(AppState::new(), Msg::FocusToggled);
        assert_eq!(map_event(&state.view(), &press(KeyCode::Char('d'))), None);
    }

    #[test]
    fn confirm_dialog_takes_yes_or_no() {
        let view = AppViewModel {
            dialog: Some(Dialog::ConfirmClearAll),
            ..AppViewModel::default()
        };
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('y'))),
            Some(Action::Dispatch(Msg::ConfirmAnswered(true)))
        );
        assert_eq!(
            map_event(&view, &press(KeyCode::Esc)),
            Some(Action::Dispatch(Msg::ConfirmAnswered(false)))
        );
        assert_eq!(map_event(&view, &press(KeyCode::F(5))), None);
        assert_eq!(map_event(&view, &Event::Paste("x".to_string())), None);
    }

    #[test]
    fn path_prompt_captures_characters() {
        let (state, _) = update(AppState::new(), Msg::AttachFileClicked);
        let view = state.view();
        assert_eq!(
            map_event(&view, &press(KeyCode::Char('d'))),
            Some(Action::Dispatch(Msg::CharTyped('d')))
        );
        assert_eq!(
            map_event(&view, &press(KeyCode::Enter)),
            Some(Action::Dispatch(Msg::PathPromptSubmitted))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let view = AppState::new().view();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event(&view, &Event::Key(key)), None);
    }
}
