//! In-memory predicate store. Each save is a single-key upsert under the map lock.

use super::{IdentityProvider, PredicateStore};
use crate::error::StoreError;
use crate::types::Scope;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
pub struct MemoryStore {
    scopes: RwLock<HashMap<Scope, BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityProvider for MemoryStore {}

impl PredicateStore for MemoryStore {
    fn load(&self, name: &str, user_id: &str, agent_id: &str) -> Result<Option<String>, StoreError> {
        let scopes = self.scopes.read();
        Ok(scopes
            .get(&Scope::new(user_id, agent_id))
            .and_then(|predicates| predicates.get(name))
            .cloned())
    }

    fn save(
        &self,
        name: &str,
        value: &str,
        user_id: &str,
        agent_id: &str,
    ) -> Result<(), StoreError> {
        self.scopes
            .write()
            .entry(Scope::new(user_id, agent_id))
            .or_default()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn predicates(
        &self,
        user_id: &str,
        agent_id: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self
            .scopes
            .read()
            .get(&Scope::new(user_id, agent_id))
            .cloned()
            .unwrap_or_default())
    }

    fn user_count(&self, agent_id: &str) -> Result<usize, StoreError> {
        Ok(self
            .scopes
            .read()
            .keys()
            .filter(|scope| scope.agent_id == agent_id)
            .count())
    }
}
