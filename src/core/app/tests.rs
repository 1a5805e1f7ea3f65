use super::*;
use crate::api::ContactInfo;
use crate::core::message::{MessageKind, Sender};
use crate::utils::test_utils::create_test_app;

fn answer(text: &str) -> AskResponse {
    AskResponse {
        answer: text.to_string(),
        ..AskResponse::default()
    }
}

#[test]
fn blank_question_warns_once_and_sends_nothing() {
    for input in ["", "   ", "\n\t "] {
        let mut app = create_test_app();
        app.ui.set_input_text(input);

        assert_eq!(app.submit_input(), None);

        let banners: Vec<_> = app.notifications.iter().collect();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].severity, Severity::Warning);
        assert_eq!(banners[0].message, EMPTY_QUESTION_WARNING);
        assert!(app.messages.is_empty());
        assert!(app.typing.is_none());
    }
}

#[test]
fn submit_records_question_and_clears_input() {
    let mut app = create_test_app();
    app.ui.set_input_text("  What are the application deadlines?  ");

    let command = app.submit_input().expect("command");

    assert_eq!(command.question, "What are the application deadlines?");
    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.messages[0].sender, Sender::User);
    assert_eq!(app.messages[0].content, "What are the application deadlines?");
    assert_eq!(app.ui.get_input_text(), "");
    assert_eq!(app.ui.counter_label(), "0/500");
    assert_eq!(
        app.typing.map(|typing| typing.request_id),
        Some(command.request_id)
    );
    assert!(app.notifications.is_empty());
}

#[test]
fn request_ids_increase() {
    let mut app = create_test_app();
    let first = app.submit_question("one").expect("first");
    let second = app.submit_question("two").expect("second");
    assert!(second.request_id > first.request_id);
}

#[test]
fn only_one_typing_indicator_exists() {
    let mut app = create_test_app();
    let first = app.submit_question("first").expect("first");
    let second = app.submit_question("second").expect("second");

    let typing = app.typing.expect("indicator");
    assert_eq!(typing.request_id, second.request_id);

    app.handle_ask_outcome(first.request_id, AskOutcome::Answered(answer("one")));
    assert!(app.typing.is_none());

    app.handle_ask_outcome(second.request_id, AskOutcome::Answered(answer("two")));
    assert!(app.typing.is_none());
    assert_eq!(app.message_count, 2);
}

#[test]
fn responses_render_in_arrival_order() {
    let mut app = create_test_app();
    let first = app.submit_question("first").expect("first");
    let second = app.submit_question("second").expect("second");

    app.handle_ask_outcome(second.request_id, AskOutcome::Answered(answer("answer two")));
    app.handle_ask_outcome(first.request_id, AskOutcome::Answered(answer("answer one")));

    let contents: Vec<_> = app.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "answer two", "answer one"]);
}

#[test]
fn successful_exchange_counts_once_even_with_contact_card() {
    let mut app = create_test_app();
    let cmd = app.submit_question("Can I apply late?").expect("command");

    app.handle_ask_outcome(
        cmd.request_id,
        AskOutcome::Answered(AskResponse {
            answer: "I couldn't find that.".to_string(),
            confidence: Some(0.12),
            source: Some("fallback".to_string()),
            contact_info: Some(ContactInfo {
                email: Some("admissions@example.edu".to_string()),
                ..ContactInfo::default()
            }),
            ..AskResponse::default()
        }),
    );

    assert_eq!(app.message_count, 1);
    assert_eq!(app.messages.len(), 3);

    let reply = &app.messages[1];
    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(reply.match_badge, Some(12));

    let card = &app.messages[2];
    assert_eq!(card.kind, MessageKind::ContactCard);
    assert!(card.content.contains("📞 Not available"));
    assert!(card.content.contains("✉️ admissions@example.edu"));
    assert!(card.content.contains("🕒 Not available"));
}

#[test]
fn contact_card_requires_fallback_source() {
    let mut app = create_test_app();
    app.render_answer(AskResponse {
        answer: "Here you go.".to_string(),
        source: Some("knowledge_base".to_string()),
        contact_info: Some(ContactInfo::default()),
        ..AskResponse::default()
    });
    assert_eq!(app.messages.len(), 1);

    app.render_answer(AskResponse {
        answer: "Not sure.".to_string(),
        source: Some("fallback".to_string()),
        contact_info: None,
        ..AskResponse::default()
    });
    assert_eq!(app.messages.len(), 2);
}

#[test]
fn confident_answers_carry_no_badge() {
    let mut app = create_test_app();
    app.render_answer(AskResponse {
        answer: "Yes.".to_string(),
        confidence: Some(0.87),
        ..AskResponse::default()
    });
    assert_eq!(app.messages[0].match_badge, None);
}

#[test]
fn answer_suggestions_replace_existing_set_only_when_non_empty() {
    let mut app = create_test_app();
    app.replace_suggestions(vec!["a".to_string(), "b".to_string()]);

    app.render_answer(AskResponse {
        answer: "x".to_string(),
        suggestions: Some(vec![]),
        ..AskResponse::default()
    });
    assert_eq!(app.suggestions, vec!["a".to_string(), "b".to_string()]);

    app.render_answer(AskResponse {
        answer: "y".to_string(),
        suggestions: Some(vec!["c".to_string()]),
        ..AskResponse::default()
    });
    assert_eq!(app.suggestions, vec!["c".to_string()]);
}

#[test]
fn server_error_uses_server_text_or_generic_fallback() {
    let mut app = create_test_app();
    let cmd = app.submit_question("?").expect("command");
    app.handle_ask_outcome(
        cmd.request_id,
        AskOutcome::Rejected {
            error: Some("Please provide a question".to_string()),
        },
    );
    let cmd = app.submit_question("again").expect("command");
    app.handle_ask_outcome(cmd.request_id, AskOutcome::Rejected { error: None });

    let errors: Vec<_> = app
        .messages
        .iter()
        .filter(|m| m.kind == MessageKind::Error)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(
        errors,
        vec![
            "Sorry, I encountered an error: Please provide a question",
            "Sorry, I encountered an error: An error occurred",
        ]
    );
    assert_eq!(app.message_count, 0);
    assert!(app.typing.is_none());
}

#[test]
fn transport_failure_renders_connectivity_message() {
    let mut app = create_test_app();
    let cmd = app.submit_question("hello?").expect("command");
    app.handle_ask_outcome(cmd.request_id, AskOutcome::Unreachable);

    let last = app.messages.back().expect("message");
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(
        last.content,
        "Sorry, I encountered an error: Network error. Please check your connection."
    );
    assert!(app.typing.is_none());
    assert_eq!(app.message_count, 0);
}

#[test]
fn selecting_a_suggestion_submits_it() {
    let mut app = create_test_app();
    app.apply_service_event(ServiceEvent::SuggestionsLoaded(vec![
        "What programs do you offer?".to_string(),
        "Are scholarships available?".to_string(),
    ]));

    let cmd = app.select_suggestion(1).expect("command");
    assert_eq!(cmd.question, "Are scholarships available?");
    assert_eq!(
        app.messages.back().map(|m| m.content.as_str()),
        Some("Are scholarships available?")
    );
    assert_eq!(app.ui.get_input_text(), "");

    assert_eq!(app.select_suggestion(9), None);
}

#[test]
fn suggestion_longer_than_input_limit_is_sent_whole() {
    let config = Config {
        max_input_chars: Some(10),
        ..Config::default()
    };
    let mut app = App::new("http://qa.test".to_string(), &config);
    app.replace_suggestions(vec!["What are the application deadlines?".to_string()]);

    let cmd = app.select_suggestion(0).expect("command");
    assert_eq!(cmd.question, "What are the application deadlines?");
    assert_eq!(
        app.messages.back().map(|m| m.content.as_str()),
        Some("What are the application deadlines?")
    );
    assert_eq!(app.ui.counter_label(), "0/10");
}

#[test]
fn suggestion_load_failure_is_silent() {
    let mut app = create_test_app();
    app.apply_service_event(ServiceEvent::SuggestionsFailed("connection refused".to_string()));
    assert!(app.suggestions.is_empty());
    assert!(app.notifications.is_empty());
    assert!(app.messages.is_empty());
}

#[test]
fn service_answer_event_routes_to_outcome_handler() {
    let mut app = create_test_app();
    let cmd = app.submit_question("hi").expect("command");
    app.apply_service_event(ServiceEvent::Answer {
        request_id: cmd.request_id,
        outcome: AskOutcome::Answered(answer("hello")),
    });
    assert_eq!(app.message_count, 1);
    assert!(app.typing.is_none());
}

#[test]
fn typing_indicator_keeps_app_animating() {
    let mut app = create_test_app();
    assert!(!app.is_animating(Instant::now()));
    app.submit_question("hi").expect("command");
    assert!(app.is_animating(Instant::now()));
}
