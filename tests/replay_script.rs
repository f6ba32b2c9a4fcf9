//! Session script parsing and replay against the shipped demo file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parlo::ParloError;
use parlo::engine::{EngineConfig, ReplayTranslator, ScriptEvent, parse_script};
use parlo::session::{RecognitionEvent, RecognitionSession};

fn demo_script() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/greeting.jsonl");
    std::fs::read_to_string(path).expect("demo script ships with the repository")
}

#[test]
fn test_shipped_demo_script_parses() {
    let script = parse_script(&demo_script()).expect("demo script must stay valid");

    assert!(
        script
            .iter()
            .any(|e| matches!(e, ScriptEvent::Final { .. })),
        "demo script has no final events"
    );
    assert!(
        script.iter().any(|e| matches!(e, ScriptEvent::Pause { .. })),
        "demo script has no pacing pauses"
    );
}

#[tokio::test]
async fn test_shipped_demo_script_replays_through_a_session() {
    let engine = ReplayTranslator::from_script_str(&demo_script(), EngineConfig::default())
        .expect("demo script parses")
        .with_pace(Duration::ZERO);
    let mut session = RecognitionSession::new(Arc::new(engine));

    let mut events = session.start().await.expect("session starts");
    let mut labels = Vec::new();
    let mut finals = Vec::new();
    while let Some(event) = events.recv().await {
        if let RecognitionEvent::Final { translations, .. } = &event {
            finals.push(translations.clone());
        }
        labels.push(event.label());
    }

    assert_eq!(labels.first(), Some(&"session_started"));
    assert_eq!(labels.last(), Some(&"session_stopped"));
    assert_eq!(labels.iter().filter(|l| **l == "final").count(), 3);
    for translations in &finals {
        assert!(translations.contains_key("de"));
        assert!(
            !translations.contains_key("fr"),
            "translations outside the configured targets must be filtered out"
        );
    }
}

#[test]
fn test_malformed_line_is_reported_with_its_number() {
    let source = concat!(
        "# comment\n",
        "\n",
        "{\"type\":\"no_match\"}\n",
        "{\"type\":\"final\",\"text\":\"ok\"\n",
    );

    match parse_script(source) {
        Err(ParloError::Script { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected a script error, got {:?}", other),
    }
}

#[test]
fn test_unknown_event_type_is_rejected() {
    match parse_script("{\"type\":\"applause\"}\n") {
        Err(ParloError::Script { line, message }) => {
            assert_eq!(line, 1);
            assert!(
                message.contains("applause"),
                "error should name the unknown type, got: {}",
                message
            );
        }
        other => panic!("expected a script error, got {:?}", other),
    }
}

#[test]
fn test_final_without_translations_parses_to_empty_map() {
    let script =
        parse_script("{\"type\":\"final\",\"text\":\"nur Text\"}\n").expect("line parses");

    match &script[0] {
        ScriptEvent::Final { translations, .. } => assert!(translations.is_empty()),
        other => panic!("expected Final, got {:?}", other),
    }
}
