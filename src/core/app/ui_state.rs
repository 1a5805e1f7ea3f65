use std::time::Instant;

use tui_textarea::{CursorMove, TextArea};

use crate::ui::theme::Theme;

/// The input box grows with its content up to this many rows.
pub const MAX_INPUT_ROWS: u16 = 5;

/// Colour band for the `n/max` character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Error,
}

impl CounterLevel {
    /// Warning past 80% of the limit, error past 90% (400 and 450 of 500).
    pub fn for_count(count: usize, max: usize) -> Self {
        if count * 10 > max * 9 {
            CounterLevel::Error
        } else if count * 10 > max * 8 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub theme: Theme,
    textarea: TextArea<'static>,
    max_input_chars: usize,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Largest useful scroll offset as of the last frame.
    pub last_max_scroll: u16,
    /// Suggestion chip highlighted with Tab, if any.
    pub selected_suggestion: Option<usize>,
    pub exit_requested: bool,
    pub started_at: Instant,
}

impl UiState {
    pub fn new(theme: Theme, max_input_chars: usize) -> Self {
        let mut state = Self {
            theme,
            textarea: TextArea::default(),
            max_input_chars,
            scroll_offset: 0,
            auto_scroll: true,
            last_max_scroll: 0,
            selected_suggestion: None,
            exit_requested: false,
            started_at: Instant::now(),
        };
        state.configure_textarea();
        state
    }

    pub(crate) fn configure_textarea(&mut self) {
        let textarea_style = self
            .theme
            .input_text_style
            .patch(ratatui::style::Style::default().bg(self.theme.background_color));
        self.textarea.set_style(textarea_style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(ratatui::style::Style::default());
        self.textarea
            .set_placeholder_text("Ask about admissions, deadlines, fees...");
        self.textarea
            .set_placeholder_style(self.theme.placeholder_style);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Characters in the input, counting line breaks.
    pub fn input_char_count(&self) -> usize {
        let lines = self.textarea.lines();
        let chars: usize = lines.iter().map(|line| line.chars().count()).sum();
        chars + lines.len().saturating_sub(1)
    }

    pub fn counter_level(&self) -> CounterLevel {
        CounterLevel::for_count(self.input_char_count(), self.max_input_chars)
    }

    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.input_char_count(), self.max_input_chars)
    }

    fn remaining_capacity(&self) -> usize {
        self.max_input_chars.saturating_sub(self.input_char_count())
    }

    pub fn set_input_text(&mut self, text: &str) {
        let capped: String = text.chars().take(self.max_input_chars).collect();
        let lines: Vec<String> = if capped.is_empty() {
            Vec::new()
        } else {
            capped.split('\n').map(str::to_string).collect()
        };
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.set_input_text("");
    }

    /// Insert text at the cursor, dropping whatever would exceed the limit.
    /// Returns false when nothing could be inserted.
    pub fn insert_into_input(&mut self, text: &str) -> bool {
        let room = self.remaining_capacity();
        if room == 0 || text.is_empty() {
            return false;
        }
        let accepted: String = text.chars().take(room).collect();
        for ch in accepted.chars() {
            if ch == '\n' {
                self.textarea.insert_newline();
            } else {
                self.textarea.insert_char(ch);
            }
        }
        true
    }

    /// Forward an editing key (cursor movement, deletion) to the text area.
    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    /// Truncate the input back to the limit after a free-form edit.
    pub fn enforce_input_limit(&mut self) {
        if self.input_char_count() > self.max_input_chars {
            let text = self.get_input_text();
            self.set_input_text(&text);
        }
    }

    /// Rows the input box needs, between 1 and [`MAX_INPUT_ROWS`].
    pub fn input_rows(&self) -> u16 {
        (self.textarea.lines().len() as u16).clamp(1, MAX_INPUT_ROWS)
    }

    pub fn cycle_suggestion(&mut self, forward: bool, available: usize) {
        if available == 0 {
            self.selected_suggestion = None;
            return;
        }
        self.selected_suggestion = Some(match (self.selected_suggestion, forward) {
            (None, true) => 0,
            (None, false) => available - 1,
            (Some(index), true) => (index + 1) % available,
            (Some(index), false) => (index + available - 1) % available,
        });
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let current = if self.auto_scroll {
            self.last_max_scroll
        } else {
            self.scroll_offset
        };
        self.auto_scroll = false;
        self.scroll_offset = current.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if self.auto_scroll {
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        if self.scroll_offset >= self.last_max_scroll {
            self.scroll_to_bottom();
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
        self.scroll_offset = self.last_max_scroll;
    }

    /// Offset to draw with, given the transcript's current maximum.
    pub fn effective_scroll(&mut self, max_scroll: u16) -> u16 {
        self.last_max_scroll = max_scroll;
        if self.auto_scroll {
            self.scroll_offset = max_scroll;
        }
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        self.scroll_offset
    }
}
