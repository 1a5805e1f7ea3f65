//! Key handling for the chat screen.
//!
//! [`handle_key_event`] is synchronous and side-effect free apart from the
//! `App` it mutates, so the event loop only has to act on the returned
//! [`KeyResult`].

use crate::core::app::{App, AskCommand};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

const SCROLL_STEP: u16 = 1;
const PAGE_STEP: u16 = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum KeyResult {
    Exit,
    Submit(AskCommand),
    Handled,
    NotHandled,
}

impl From<Option<AskCommand>> for KeyResult {
    fn from(command: Option<AskCommand>) -> Self {
        match command {
            Some(command) => KeyResult::Submit(command),
            // A rejected submission still shows a banner
            None => KeyResult::Handled,
        }
    }
}

pub fn handle_key_event(app: &mut App, key: &KeyEvent) -> KeyResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => {
            app.ui.exit_requested = true;
            KeyResult::Exit
        }
        KeyCode::Enter if alt || shift => {
            app.ui.selected_suggestion = None;
            app.ui.insert_into_input("\n");
            KeyResult::Handled
        }
        KeyCode::Enter => match app.ui.selected_suggestion {
            Some(index) => app.select_suggestion(index).into(),
            None => app.submit_input().into(),
        },
        KeyCode::Tab => {
            app.ui.cycle_suggestion(true, app.suggestions.len());
            KeyResult::Handled
        }
        KeyCode::BackTab => {
            app.ui.cycle_suggestion(false, app.suggestions.len());
            KeyResult::Handled
        }
        KeyCode::Esc => {
            if app.ui.selected_suggestion.take().is_some() {
                KeyResult::Handled
            } else {
                KeyResult::NotHandled
            }
        }
        KeyCode::Char(digit @ '1'..='9') if alt => {
            let index = digit as usize - '1' as usize;
            match app.select_suggestion(index) {
                Some(command) => KeyResult::Submit(command),
                None => KeyResult::NotHandled,
            }
        }
        KeyCode::PageUp => {
            app.ui.scroll_up(PAGE_STEP);
            KeyResult::Handled
        }
        KeyCode::PageDown => {
            app.ui.scroll_down(PAGE_STEP);
            KeyResult::Handled
        }
        KeyCode::Up if ctrl => {
            app.ui.scroll_up(SCROLL_STEP);
            KeyResult::Handled
        }
        KeyCode::Down if ctrl => {
            app.ui.scroll_down(SCROLL_STEP);
            KeyResult::Handled
        }
        KeyCode::End if ctrl => {
            app.ui.scroll_to_bottom();
            KeyResult::Handled
        }
        KeyCode::Char(ch) if !ctrl && !alt => {
            app.ui.selected_suggestion = None;
            let mut buf = [0; 4];
            app.ui.insert_into_input(ch.encode_utf8(&mut buf));
            KeyResult::Handled
        }
        _ => {
            let input = TAInput::from(*key);
            app.ui.apply_textarea_edit(|ta| {
                ta.input(input);
            });
            app.ui.enforce_input_limit();
            KeyResult::Handled
        }
    }
}

/// Normalise pasted text: CRLF and CR become LF, tabs become spaces, other
/// control characters are dropped.
pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

pub fn handle_paste(app: &mut App, text: &str) {
    let sanitized = sanitize_pasted_text(text);
    if sanitized.is_empty() {
        return;
    }
    app.ui.selected_suggestion = None;
    app.ui.insert_into_input(&sanitized);
}
