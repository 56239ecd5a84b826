use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_interactive_chat() {
    let args = parse_args(&["quickreply"]);
    assert!(args.command.is_none());
    assert!(args.is_interactive());

    let args = parse_args(&["quickreply", "chat"]);
    assert_eq!(args.command, Some(Commands::Chat));
    assert!(args.is_interactive());
}

#[test]
fn say_collects_prompt_words() {
    let args = parse_args(&["quickreply", "say", "hello", "there", "-friend"]);
    assert_eq!(
        args.command,
        Some(Commands::Say {
            prompt: vec!["hello".into(), "there".into(), "-friend".into()],
        })
    );
    assert!(!args.is_interactive());
}

#[test]
fn global_flags_apply_to_subcommands() {
    let argv = [
        "quickreply",
        "-m",
        "gemini-1.5-pro",
        "--persona",
        "A pirate",
        "--log",
        "chat.log",
        "say",
        "ahoy",
    ];
    let args = parse_args(&argv);
    assert_eq!(args.model.as_deref(), Some("gemini-1.5-pro"));
    assert_eq!(args.persona.as_deref(), Some("A pirate"));
    assert_eq!(args.log.as_deref(), Some("chat.log"));
    assert_eq!(
        args.command,
        Some(Commands::Say {
            prompt: vec!["ahoy".into()],
        })
    );
}

#[test]
fn trace_file_flag_is_a_path() {
    let args = parse_args(&["quickreply", "--trace-file", "/tmp/trace.log"]);
    assert_eq!(args.trace_file, Some(PathBuf::from("/tmp/trace.log")));
}

#[test]
fn set_accepts_multi_word_values() {
    let args = parse_args(&["quickreply", "set", "persona", "A", "stern", "librarian."]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "persona".into(),
            value: vec!["A".into(), "stern".into(), "librarian.".into()],
        })
    );

    let args = parse_args(&["quickreply", "set", "model"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "model".into(),
            value: Vec::new(),
        })
    );
}

#[test]
fn unset_requires_key() {
    assert!(Args::try_parse_from(["quickreply", "unset"]).is_err());
    let args = parse_args(&["quickreply", "unset", "base-url"]);
    assert_eq!(
        args.command,
        Some(Commands::Unset {
            key: "base-url".into(),
        })
    );
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["quickreply", "auth"]).is_err());
}
