use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["askbox"]);
    assert!(args.command.is_none());
    assert!(args.url.is_none());
    assert!(args.debug_log.is_none());
}

#[test]
fn global_flags_work_after_subcommand() {
    let argv = [
        "askbox",
        "chat",
        "--url",
        "http://qa.test:8080",
        "--debug-log",
        "askbox.log",
    ];
    let args = parse_args(&argv);
    assert!(matches!(args.command, Some(Commands::Chat)));
    assert_eq!(args.url.as_deref(), Some("http://qa.test:8080"));
    assert_eq!(args.debug_log, Some(PathBuf::from("askbox.log")));
}

#[test]
fn ask_collects_question_words() {
    let argv = ["askbox", "ask", "--markup", "What", "are", "the", "fees?"];
    match parse_args(&argv).command {
        Some(Commands::Ask { markup, question }) => {
            assert!(markup);
            assert_eq!(question.join(" "), "What are the fees?");
        }
        _ => panic!("expected ask subcommand for argv={argv:?}"),
    }
}

#[test]
fn set_accepts_key_and_value() {
    let argv = ["askbox", "set", "timeout", "15"];
    match parse_args(&argv).command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "timeout");
            assert_eq!(value, Some(vec!["15".to_string()]));
        }
        _ => panic!("expected set subcommand for argv={argv:?}"),
    }
}

#[test]
fn unset_and_config_parse() {
    assert!(matches!(
        parse_args(&["askbox", "unset", "base-url"]).command,
        Some(Commands::Unset { ref key }) if key == "base-url"
    ));
    assert!(matches!(
        parse_args(&["askbox", "config"]).command,
        Some(Commands::Config)
    ));
    assert!(matches!(
        parse_args(&["askbox", "suggestions"]).command,
        Some(Commands::Suggestions)
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["askbox", "auth"]).is_err());
}
