use super::support::test_config;
use parlance::tooling::cli::{CliContext, Commands, PredicateCommands};
use tempfile::TempDir;

fn context(temp: &TempDir) -> CliContext {
    CliContext::new(&test_config(temp.path(), false)).unwrap()
}

#[test]
fn eval_renders_template() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let output = cli
        .execute(&Commands::Eval {
            user: "alice".to_string(),
            agent: "aria".to_string(),
            template: Some("Hi, I'm <bot name=\"name\"/>.".to_string()),
            file: None,
        })
        .unwrap();
    assert_eq!(output, "Hi, I'm Aria.");
}

#[test]
fn eval_reads_template_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("greeting.aiml");
    std::fs::write(&path, "<bot name=\"master\"/> made me.").unwrap();

    let cli = context(&temp);
    let output = cli
        .execute(&Commands::Eval {
            user: "alice".to_string(),
            agent: "aria".to_string(),
            template: None,
            file: Some(path),
        })
        .unwrap();
    assert_eq!(output, "Ada made me.");
}

#[test]
fn predicate_set_get_and_list() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);

    let get = |name: &str| {
        cli.execute(&Commands::Predicate {
            command: PredicateCommands::Get {
                user: "alice".to_string(),
                agent: "aria".to_string(),
                name: name.to_string(),
            },
        })
        .unwrap()
    };

    assert_eq!(get("topic"), "topic is not set");

    cli.execute(&Commands::Predicate {
        command: PredicateCommands::Set {
            user: "alice".to_string(),
            agent: "aria".to_string(),
            name: "topic".to_string(),
            value: "cats".to_string(),
        },
    })
    .unwrap();
    assert_eq!(get("topic"), "cats");

    let listed = cli
        .execute(&Commands::Predicate {
            command: PredicateCommands::List {
                user: "alice".to_string(),
                agent: "aria".to_string(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(parsed["predicates"]["topic"], "cats");
    assert_eq!(parsed["user_id"], "alice");

    let users = cli
        .execute(&Commands::Users {
            agent: "aria".to_string(),
        })
        .unwrap();
    assert_eq!(users, "1");
}

#[test]
fn list_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let result = cli.execute(&Commands::Predicate {
        command: PredicateCommands::List {
            user: "alice".to_string(),
            agent: "aria".to_string(),
            format: "yaml".to_string(),
        },
    });
    assert!(result.is_err());
}

#[test]
fn tags_lists_standard_handlers() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp).execute(&Commands::Tags).unwrap();
    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["bot", "get", "gossip", "id", "set", "think"]);
}

#[test]
fn eval_for_unconfigured_agent_still_answers() {
    let temp = TempDir::new().unwrap();
    let cli = context(&temp);
    let output = cli
        .execute(&Commands::Eval {
            user: "alice".to_string(),
            agent: "stranger".to_string(),
            template: Some("Name: <bot name=\"name\"/>.".to_string()),
            file: None,
        })
        .unwrap();
    assert_eq!(output, "Name: .");
}
