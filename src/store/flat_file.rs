//! Flat-file predicate store
//!
//! One property file per (agent, user) pair at
//! `<base_dir>/<agent_id>/<user_id><suffix>`. Files and directories are
//! created on first access. A save reads the whole unit, updates one key and
//! rewrites the unit; the per-pair write lock makes that sequence atomic with
//! respect to other saves and loads of the same pair.

use super::properties;
use super::{IdentityProvider, PredicateStore};
use crate::concurrency::ScopeLockManager;
use crate::error::StoreError;
use crate::types::Scope;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Default predicate directory, relative to the working directory
pub const DEFAULT_BASE_DIR: &str = "ffm";

/// Default predicate file suffix
pub const DEFAULT_SUFFIX: &str = ".predicates";

pub struct FlatFileStore {
    base_dir: PathBuf,
    suffix: String,
    locks: ScopeLockManager,
}

impl FlatFileStore {
    /// The suffix must be a usable file name fragment: non-empty, with no path separators.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        suffix: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let suffix = suffix.into();
        validate_component("suffix", &suffix)?;
        Ok(Self {
            base_dir: base_dir.into(),
            suffix,
            locks: ScopeLockManager::new(),
        })
    }

    /// Path of the predicate unit for a pair
    pub fn path_for(&self, user_id: &str, agent_id: &str) -> Result<PathBuf, StoreError> {
        validate_component("agent", agent_id)?;
        validate_component("user", user_id)?;
        Ok(self
            .base_dir
            .join(agent_id)
            .join(format!("{}{}", user_id, self.suffix)))
    }

    /// Create the unit and its directories if absent. Existing units are left untouched.
    fn ensure_exists(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }

    fn read_unit(&self, path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        self.ensure_exists(path)?;
        match fs::read_to_string(path) {
            Ok(text) => Ok(properties::decode(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Replace the unit through a uniquely named sibling temp file so readers
    /// never see a partial file and no other unit's path is ever touched.
    fn write_unit(
        &self,
        path: &Path,
        predicates: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        let parent = path.parent().unwrap_or(self.base_dir.as_path());
        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
        temp.write_all(properties::encode(predicates).as_bytes())
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| StoreError::io(path, e.error))?;
        Ok(())
    }
}

fn validate_component(kind: &'static str, value: &str) -> Result<(), StoreError> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl IdentityProvider for FlatFileStore {}

impl PredicateStore for FlatFileStore {
    fn load(&self, name: &str, user_id: &str, agent_id: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(user_id, agent_id)?;
        let lock = self.locks.get_lock(&Scope::new(user_id, agent_id));
        let _guard = lock.read();

        let mut predicates = self.read_unit(&path)?;
        Ok(predicates.remove(name))
    }

    fn save(
        &self,
        name: &str,
        value: &str,
        user_id: &str,
        agent_id: &str,
    ) -> Result<(), StoreError> {
        let path = self.path_for(user_id, agent_id)?;
        let lock = self.locks.get_lock(&Scope::new(user_id, agent_id));
        let _guard = lock.write();

        let mut predicates = self.read_unit(&path)?;
        predicates.insert(name.to_string(), value.to_string());
        self.write_unit(&path, &predicates)?;

        debug!(
            predicate = name,
            user_id,
            agent_id,
            path = %path.display(),
            "Saved predicate"
        );
        Ok(())
    }

    fn predicates(
        &self,
        user_id: &str,
        agent_id: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.path_for(user_id, agent_id)?;
        let lock = self.locks.get_lock(&Scope::new(user_id, agent_id));
        let _guard = lock.read();
        self.read_unit(&path)
    }

    fn user_count(&self, agent_id: &str) -> Result<usize, StoreError> {
        validate_component("agent", agent_id)?;
        let agent_dir = self.base_dir.join(agent_id);
        let entries = match fs::read_dir(&agent_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::io(&agent_dir, e)),
        };

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&agent_dir, e))?;
            let file_name = entry.file_name();
            let is_unit = file_name
                .to_str()
                .map(|name| name.len() > self.suffix.len() && name.ends_with(&self.suffix))
                .unwrap_or(false);
            if is_unit && entry.path().is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}
