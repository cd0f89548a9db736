use super::support::test_config;
use parlance::store::{FlatFileStore, PredicateStore};
use parlance::Runtime;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn concurrent_saves_to_one_pair_lose_nothing() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(FlatFileStore::new(temp.path().join("ffm"), ".predicates").unwrap());

    let mut handles = vec![];
    for writer in 0..8 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            for i in 0..10 {
                let name = format!("key_{}_{}", writer, i);
                store.save(&name, &i.to_string(), "alice", "aria").unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let all = store.predicates("alice", "aria").unwrap();
    assert_eq!(all.len(), 80);
    assert_eq!(all.get("key_7_9").map(String::as_str), Some("9"));
}

#[test]
fn concurrent_conversations_keep_their_own_state() {
    let temp = TempDir::new().unwrap();
    let runtime = Arc::new(Runtime::from_config(&test_config(temp.path(), false)).unwrap());

    let mut handles = vec![];
    for n in 0..6 {
        let runtime = runtime.clone();
        handles.push(thread::spawn(move || {
            let user = format!("user{}", n);
            for turn in 0..5 {
                let markup = format!("<think><set name=\"turn\">{}</set></think>", turn);
                runtime.respond(&markup, &user, "aria").unwrap();
            }
            runtime
                .respond("<get name=\"turn\"/> for <id/>", &user, "aria")
                .unwrap()
        }));
    }

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("4 for user{}", n));
    }
    assert_eq!(runtime.store().user_count("aria").unwrap(), 6);
}
