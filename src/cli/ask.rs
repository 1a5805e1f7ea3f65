//! TUI-less `ask` and `suggestions` commands

use std::error::Error;

use crate::api::QaBackend;
use crate::core::app::{App, EMPTY_QUESTION_WARNING};
use crate::core::ask_service::AskOutcome;
use crate::core::message::{match_badge_label, Message};

/// What a single non-interactive question produced.
#[derive(Debug, PartialEq, Eq)]
pub enum OneShot {
    /// Rendered bot replies, ready to print.
    Answered(String),
    /// The inline error the chat would have shown.
    Failed(String),
    Empty,
}

/// Run one question through the same controller the chat screen uses.
pub async fn ask_once(
    backend: &dyn QaBackend,
    app: &mut App,
    question: &str,
    markup: bool,
) -> OneShot {
    let Some(command) = app.submit_question(question) else {
        return OneShot::Empty;
    };
    let first_reply = app.messages.len();

    let outcome = AskOutcome::from(backend.ask(&command.question).await);
    let answered = matches!(outcome, AskOutcome::Answered(_));
    app.handle_ask_outcome(command.request_id, outcome);

    let rendered = app
        .messages
        .iter()
        .skip(first_reply)
        .map(|message| render_reply(message, markup))
        .collect::<Vec<_>>()
        .join("\n\n");

    if answered {
        OneShot::Answered(rendered)
    } else {
        OneShot::Failed(rendered)
    }
}

pub fn render_reply(message: &Message, markup: bool) -> String {
    let formatted = message.formatted();
    let mut out = if markup {
        formatted.to_markup()
    } else {
        formatted.to_plain()
    };
    if let Some(percent) = message.match_badge {
        let label = match_badge_label(percent);
        if markup {
            out.push_str(&format!(r#" <span class="match-badge">{label}</span>"#));
        } else {
            out.push_str(&format!("\n({label})"));
        }
    }
    out
}

pub async fn run_ask(
    backend: &dyn QaBackend,
    mut app: App,
    question: Vec<String>,
    markup: bool,
) -> Result<(), Box<dyn Error>> {
    let question = question.join(" ");
    match ask_once(backend, &mut app, &question, markup).await {
        OneShot::Answered(text) => {
            println!("{text}");
            Ok(())
        }
        OneShot::Failed(text) => Err(text.into()),
        OneShot::Empty => Err(EMPTY_QUESTION_WARNING.into()),
    }
}

pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No suggestions available.".to_string();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(index, suggestion)| format!("{:>2}. {suggestion}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run_suggestions(backend: &dyn QaBackend) -> Result<(), Box<dyn Error>> {
    let suggestions = backend.fetch_suggestions().await?;
    println!("{}", format_suggestions(&suggestions));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AskError, AskResponse, ContactInfo};
    use crate::core::ask_service::test_support::ScriptedBackend;
    use crate::utils::test_utils::create_test_app;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn answered_question_prints_reply_badge_and_card() {
        let backend = ScriptedBackend::with_answers(vec![Ok(AskResponse {
            answer: "Not sure, see https://example.edu/faq".to_string(),
            confidence: Some(0.2),
            source: Some("fallback".to_string()),
            contact_info: Some(ContactInfo {
                admission_office: Some("+1 555 0100".to_string()),
                ..ContactInfo::default()
            }),
            ..AskResponse::default()
        })]);
        let mut app = create_test_app();

        let result = ask_once(&backend, &mut app, "  late application?  ", false).await;

        let OneShot::Answered(text) = result else {
            panic!("expected an answer, got {result:?}");
        };
        assert!(text.starts_with("Not sure, see https://example.edu/faq\n(20% match)"));
        assert!(text.contains("Need Human Assistance?\n📞 +1 555 0100"));
        assert!(text.contains("✉️ Not available"));
        assert_eq!(
            backend.questions.lock().expect("lock").as_slice(),
            ["late application?".to_string()]
        );
        assert_eq!(app.message_count, 1);
    }

    #[tokio::test]
    async fn markup_mode_renders_html() {
        let backend = ScriptedBackend::with_answers(vec![Ok(AskResponse {
            answer: "**Yes** at https://example.edu".to_string(),
            ..AskResponse::default()
        })]);
        let mut app = create_test_app();

        assert_eq!(
            ask_once(&backend, &mut app, "open?", true).await,
            OneShot::Answered(
                r#"<strong>Yes</strong> at <a href="https://example.edu" target="_blank">https://example.edu</a>"#
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn blank_question_sends_nothing() {
        let backend = ScriptedBackend::default();
        let mut app = create_test_app();

        assert_eq!(ask_once(&backend, &mut app, " \n ", false).await, OneShot::Empty);
        assert!(backend.questions.lock().expect("lock").is_empty());
        assert_eq!(app.notifications.len(), 1);
    }

    #[tokio::test]
    async fn server_error_is_reported_as_failure() {
        let backend = ScriptedBackend::with_answers(vec![Err(AskError::Rejected {
            status: StatusCode::BAD_REQUEST,
            error: Some("Please provide a question".to_string()),
        })]);
        let mut app = create_test_app();

        assert_eq!(
            ask_once(&backend, &mut app, "x", false).await,
            OneShot::Failed("Sorry, I encountered an error: Please provide a question".to_string())
        );
    }

    #[tokio::test]
    async fn run_ask_fails_on_empty_question() {
        let backend = ScriptedBackend::default();
        let err = run_ask(&backend, create_test_app(), vec![], false)
            .await
            .expect_err("empty question");
        assert_eq!(err.to_string(), EMPTY_QUESTION_WARNING);
    }

    #[test]
    fn suggestions_are_numbered() {
        assert_eq!(
            format_suggestions(&["Fees?".to_string(), "Deadlines?".to_string()]),
            " 1. Fees?\n 2. Deadlines?"
        );
        assert_eq!(format_suggestions(&[]), "No suggestions available.");
    }
}
