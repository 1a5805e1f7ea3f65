//! The chat controller.
//!
//! [`App`] mediates between the input box, the backend and the transcript.
//! It never performs I/O itself: submitting a question yields an
//! [`AskCommand`] that the event loop hands to the
//! [`AskService`](crate::core::ask_service::AskService), and the service's
//! results come back through [`App::apply_service_event`].

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::AskResponse;
use crate::core::ask_service::{AskOutcome, ServiceEvent};
use crate::core::config::Config;
use crate::core::message::{match_badge, Message};
use crate::core::notification::{NotificationCenter, Severity};
use crate::ui::theme::Theme;

pub mod ui_state;

#[cfg(test)]
mod tests;

pub use ui_state::{CounterLevel, UiState};

pub const EMPTY_QUESTION_WARNING: &str = "Please enter a question";
pub const GENERIC_SERVER_ERROR: &str = "An error occurred";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";

/// A question the event loop should send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskCommand {
    pub request_id: u64,
    pub question: String,
}

/// The singleton "AI is thinking" row at the end of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingIndicator {
    pub request_id: u64,
    pub started: Instant,
}

pub struct App {
    pub messages: VecDeque<Message>,
    pub suggestions: Vec<String>,
    /// Successful exchanges so far.
    pub message_count: u64,
    pub typing: Option<TypingIndicator>,
    pub notifications: NotificationCenter,
    pub ui: UiState,
    pub base_url: String,
    next_request_id: u64,
}

impl App {
    pub fn new(base_url: String, config: &Config) -> Self {
        let theme = Theme::by_name(config.theme_name()).unwrap_or_else(Theme::dark_default);
        Self {
            messages: VecDeque::new(),
            suggestions: Vec::new(),
            message_count: 0,
            typing: None,
            notifications: NotificationCenter::new(),
            ui: UiState::new(theme, config.max_input_chars()),
            base_url,
            next_request_id: 1,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.push(message, severity, Instant::now());
    }

    /// Validate and record a question. Returns the request to send, or
    /// `None` (with a warning banner) when the question is blank.
    pub fn submit_question(&mut self, text: &str) -> Option<AskCommand> {
        let question = text.trim();
        if question.is_empty() {
            self.notify(EMPTY_QUESTION_WARNING, Severity::Warning);
            return None;
        }

        self.messages.push_back(Message::user(question));
        self.ui.clear_input();
        self.ui.selected_suggestion = None;
        self.ui.scroll_to_bottom();

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.show_typing_indicator(request_id);
        info!(request_id, chars = question.chars().count(), "Question submitted");

        Some(AskCommand {
            request_id,
            question: question.to_string(),
        })
    }

    pub fn submit_input(&mut self) -> Option<AskCommand> {
        let text = self.ui.get_input_text();
        self.submit_question(&text)
    }

    /// Send a suggestion chip as it reads, whatever the input limit.
    pub fn select_suggestion(&mut self, index: usize) -> Option<AskCommand> {
        let suggestion = self.suggestions.get(index)?.clone();
        self.submit_question(&suggestion)
    }

    fn show_typing_indicator(&mut self, request_id: u64) {
        self.remove_typing_indicator();
        self.typing = Some(TypingIndicator {
            request_id,
            started: Instant::now(),
        });
    }

    fn remove_typing_indicator(&mut self) {
        self.typing = None;
    }

    pub fn handle_ask_outcome(&mut self, request_id: u64, outcome: AskOutcome) {
        self.remove_typing_indicator();

        match outcome {
            AskOutcome::Answered(response) => {
                self.render_answer(response);
                self.message_count += 1;
                debug!(request_id, total = self.message_count, "Exchange completed");
            }
            AskOutcome::Rejected { error } => {
                let error = error.unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
                self.messages.push_back(Message::bot_error(&error));
            }
            AskOutcome::Unreachable => {
                self.messages.push_back(Message::bot_error(NETWORK_ERROR));
            }
        }
    }

    pub fn render_answer(&mut self, response: AskResponse) {
        let is_fallback = response.is_fallback();
        let AskResponse {
            answer,
            confidence,
            suggestions,
            contact_info,
            ..
        } = response;

        self.messages
            .push_back(Message::bot(answer).with_match_badge(match_badge(confidence)));

        if let Some(suggestions) = suggestions.filter(|list| !list.is_empty()) {
            self.replace_suggestions(suggestions);
        }

        if is_fallback {
            if let Some(info) = contact_info {
                self.messages.push_back(Message::contact_card(&info));
            }
        }
    }

    pub fn replace_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.ui.selected_suggestion = None;
    }

    pub fn apply_service_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::Answer {
                request_id,
                outcome,
            } => self.handle_ask_outcome(request_id, outcome),
            ServiceEvent::SuggestionsLoaded(suggestions) => {
                debug!(count = suggestions.len(), "Suggestions loaded");
                self.replace_suggestions(suggestions);
            }
            ServiceEvent::SuggestionsFailed(error) => {
                warn!(%error, "Error loading suggestions");
            }
        }
    }

    /// True while something on screen changes without input.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.typing.is_some() || self.notifications.is_animating(now)
    }
}
