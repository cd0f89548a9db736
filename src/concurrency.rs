//! Concurrent access safety for predicate storage
//!
//! Provides per-scope locking so that read-modify-write cycles against one
//! (agent, user) predicate unit are serialized, while conversations with other
//! users, or with other agents, proceed without contention.
//!
//! The manager only holds weak references, so a scope's lock lives exactly as
//! long as some caller holds it and idle scopes do not accumulate.

use crate::types::Scope;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Per-scope lock manager
///
/// Readers of a scope share its lock; a writer holds it exclusively for the
/// whole load, modify and rewrite sequence.
pub struct ScopeLockManager {
    /// Map from scope to its lock. The outer lock is only held for the lookup.
    locks: RwLock<HashMap<Scope, Weak<RwLock<()>>>>,
}

impl ScopeLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the lock for a scope
    ///
    /// Every caller holding the returned `Arc` shares one lock for the scope.
    pub fn get_lock(&self, scope: &Scope) -> Arc<RwLock<()>> {
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(scope).and_then(Weak::upgrade) {
                return lock;
            }
        }

        // Double-check after acquiring the write lock, another thread may have created it
        let mut map = self.locks.write();
        if let Some(lock) = map.get(scope).and_then(Weak::upgrade) {
            return lock;
        }
        map.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(RwLock::new(()));
        map.insert(scope.clone(), Arc::downgrade(&lock));
        lock
    }

    /// Number of scopes whose lock is currently held by some caller
    pub fn tracked_scopes(&self) -> usize {
        self.locks
            .read()
            .values()
            .filter(|lock| lock.strong_count() > 0)
            .count()
    }
}

impl Default for ScopeLockManager {
    fn default() -> Self {
        Self::new()
    }
}
