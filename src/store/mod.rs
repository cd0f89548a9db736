//! Predicate Store
//!
//! Durable per-(user, agent) key-value state read and written by template
//! handlers. A predicate that was never assigned loads as `Ok(None)`; only
//! genuine storage failures are errors.

pub mod flat_file;
pub mod memory;
pub mod properties;

pub use flat_file::FlatFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use std::collections::BTreeMap;

/// Optional identity hooks. Every method succeeds unless a backend overrides it.
pub trait IdentityProvider {
    fn authenticate(&self, _user_id: &str, _secret: &str, _agent_id: &str) -> bool {
        true
    }

    fn provision(&self, _user_id: &str, _secret: &str, _agent_id: &str) -> bool {
        true
    }

    fn change_secret(&self, _user_id: &str, _secret: &str, _agent_id: &str) -> bool {
        true
    }
}

/// Predicate store interface
pub trait PredicateStore: IdentityProvider + Send + Sync {
    /// Current value of `name`, or `None` if it was never set.
    fn load(&self, name: &str, user_id: &str, agent_id: &str) -> Result<Option<String>, StoreError>;

    /// Write-through save. Visible to every subsequent `load` once this returns.
    fn save(&self, name: &str, value: &str, user_id: &str, agent_id: &str)
        -> Result<(), StoreError>;

    /// Every predicate held for the pair, sorted by name.
    fn predicates(
        &self,
        user_id: &str,
        agent_id: &str,
    ) -> Result<BTreeMap<String, String>, StoreError>;

    /// Number of distinct users with persisted state under `agent_id`.
    fn user_count(&self, agent_id: &str) -> Result<usize, StoreError>;
}
