use super::support::test_config;
use parlance::config::ParlanceConfig;
use parlance::store::MemoryStore;
use parlance::{ApiError, ProcessorError, Runtime};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn unknown_tag_falls_back_to_inner_text() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), false)).unwrap();
    assert_eq!(
        runtime.respond("<badtag>inner text</badtag>", "alice", "aria").unwrap(),
        "inner text"
    );
}

#[test]
fn bot_property_lookup() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), false)).unwrap();
    assert_eq!(
        runtime.respond("I am <bot name=\"name\"/>.", "alice", "aria").unwrap(),
        "I am Aria."
    );
    assert_eq!(runtime.respond("<bot name=\"\"/>", "alice", "aria").unwrap(), "");
}

#[test]
fn bot_with_content_is_invalid() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), false)).unwrap();
    let err = runtime
        .respond("<bot name=\"name\">oops</bot>", "alice", "aria")
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Processor(ProcessorError::InvalidContent { ref tag, .. }) if tag == "bot"
    ));
}

#[test]
fn gossip_with_structured_log_enabled() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), true);
    let runtime = Runtime::from_config(&config).unwrap();

    let response = runtime
        .respond("<gossip>Hello</gossip>", "alice", "aria")
        .unwrap();
    assert_eq!(response, "");

    let xml = fs::read_to_string(&config.gossip.xml_path).unwrap();
    assert!(xml.contains("Hello\n"));
    assert!(xml.starts_with("<aiml>"));
    assert!(xml.trim_end().ends_with("</aiml>"));

    let plain = fs::read_to_string(&config.gossip.plain_path).unwrap();
    assert!(plain.contains("Hello"));
}

#[test]
fn gossip_with_structured_log_disabled() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), false);
    let runtime = Runtime::from_config(&config).unwrap();

    let response = runtime
        .respond("Before <gossip>Hello <bot name=\"name\"/></gossip>after", "alice", "aria")
        .unwrap();
    assert_eq!(response, "Before after");

    assert!(!config.gossip.xml_path.exists());
    let plain = fs::read_to_string(&config.gossip.plain_path).unwrap();
    assert_eq!(plain.lines().count(), 1);
    assert!(plain.contains("Hello Aria"));
}

#[test]
fn empty_gossip_is_invalid() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), true)).unwrap();
    for markup in ["<gossip/>", "<gossip></gossip>"] {
        let err = runtime.respond(markup, "alice", "aria").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Processor(ProcessorError::InvalidContent { .. })
        ));
    }
}

#[test]
fn depth_guard_stops_deep_templates() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path(), false);
    config.evaluator.max_depth = 5;
    let runtime = Runtime::from_config(&config).unwrap();

    let shallow = "<a><b><c><d><e>ok</e></d></c></b></a>";
    assert_eq!(runtime.respond(shallow, "alice", "aria").unwrap(), "ok");

    let deep = "<a><b><c><d><e><f>too deep</f></e></d></c></b></a>";
    let err = runtime.respond(deep, "alice", "aria").unwrap_err();
    assert!(matches!(
        err,
        ApiError::Processor(ProcessorError::DepthExceeded { max: 5, .. })
    ));
}

#[test]
fn runaway_nesting_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), false)).unwrap();

    let hostile = format!("{}x{}", "<a>".repeat(5000), "</a>".repeat(5000));
    let err = runtime.respond(&hostile, "alice", "aria").unwrap_err();
    assert!(matches!(
        err,
        ApiError::Processor(ProcessorError::DepthExceeded { max: 64, ref tag }) if tag == "a"
    ));

    // Still serving afterwards
    assert_eq!(runtime.respond("fine", "alice", "aria").unwrap(), "fine");
}

#[test]
fn with_store_validates_configuration() {
    let mut config = ParlanceConfig::default();
    config.evaluator.max_depth = 0;
    let result = Runtime::with_store(&config, Arc::new(MemoryStore::new()));
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn predicates_survive_runtime_restart() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), false);

    {
        let runtime = Runtime::from_config(&config).unwrap();
        let response = runtime
            .respond("<think><set name=\"topic\">cats</set></think>Noted.", "alice", "aria")
            .unwrap();
        assert_eq!(response, "Noted.");
    }

    let runtime = Runtime::from_config(&config).unwrap();
    assert_eq!(
        runtime
            .respond("Still on <get name=\"topic\"/>, <id/>?", "alice", "aria")
            .unwrap(),
        "Still on cats, alice?"
    );
    assert_eq!(runtime.store().user_count("aria").unwrap(), 1);
}

#[test]
fn parse_errors_are_reported() {
    let temp = TempDir::new().unwrap();
    let runtime = Runtime::from_config(&test_config(temp.path(), false)).unwrap();
    let err = runtime.respond("<think>open", "alice", "aria").unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn unusable_store_aborts_evaluation() {
    let temp = TempDir::new().unwrap();
    let mut config = test_config(temp.path(), false);
    // A regular file where the store directory should be
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    config.store.base_dir = blocker;
    let runtime = Runtime::from_config(&config).unwrap();

    let err = runtime
        .respond("<set name=\"topic\">cats</set>", "alice", "aria")
        .unwrap_err();
    match err {
        ApiError::Processor(inner) => assert!(!inner.is_template_error()),
        other => panic!("unexpected error: {:?}", other),
    }
}
