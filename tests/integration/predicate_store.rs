use parlance::store::{FlatFileStore, PredicateStore};
use proptest::prelude::*;
use tempfile::TempDir;

fn store(temp: &TempDir) -> FlatFileStore {
    FlatFileStore::new(temp.path().join("ffm"), ".predicates").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn save_then_load_round_trips(
        name in ".{0,16}",
        value in ".{0,32}",
        user in "[a-z0-9_]{1,8}",
        agent in "[a-z0-9_]{1,8}",
    ) {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.save(&name, &value, &user, &agent).unwrap();
        prop_assert_eq!(store.load(&name, &user, &agent).unwrap(), Some(value));
    }

    #[test]
    fn never_saved_is_not_set(
        name in "[a-z]{1,8}",
        user in "[a-z]{1,8}",
        agent in "[a-z]{1,8}",
    ) {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        prop_assert_eq!(store.load(&name, &user, &agent).unwrap(), None);
        store.save("other", "x", &user, &agent).unwrap();
        if name != "other" {
            prop_assert_eq!(store.load(&name, &user, &agent).unwrap(), None);
        }
    }

    #[test]
    fn saving_twice_leaves_one_value(
        name in "[a-z]{1,8}",
        value in ".{0,16}",
    ) {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.save(&name, &value, "alice", "aria").unwrap();
        store.save(&name, &value, "alice", "aria").unwrap();
        let all = store.predicates("alice", "aria").unwrap();
        prop_assert_eq!(all.len(), 1);
        prop_assert_eq!(all.get(&name), Some(&value));
    }

    #[test]
    fn users_are_isolated(
        name in "[a-z]{1,8}",
        first in ".{0,16}",
        second in ".{0,16}",
    ) {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.save(&name, &first, "u1", "aria").unwrap();
        store.save(&name, &second, "u2", "aria").unwrap();
        store.save("extra", "x", "u2", "aria").unwrap();
        prop_assert_eq!(store.load(&name, "u1", "aria").unwrap(), Some(first));
        prop_assert_eq!(store.load("extra", "u1", "aria").unwrap(), None);
        prop_assert_eq!(store.predicates("u1", "aria").unwrap().len(), 1);
    }
}

#[test]
fn last_write_wins() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    store.save("mood", "happy", "alice", "aria").unwrap();
    store.save("mood", "sleepy", "alice", "aria").unwrap();
    assert_eq!(store.load("mood", "alice", "aria").unwrap(), Some("sleepy".to_string()));
}

#[test]
fn visible_to_a_fresh_store_instance() {
    let temp = TempDir::new().unwrap();
    store(&temp).save("name", "Alice", "alice", "aria").unwrap();
    assert_eq!(
        store(&temp).load("name", "alice", "aria").unwrap(),
        Some("Alice".to_string())
    );
}
