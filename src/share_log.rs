//! Share (gossip) log
//!
//! Destination for text recorded by the `gossip` tag. Every entry goes to a
//! plain, timestamped, append-only log file and to the `parlance::gossip`
//! tracing target. When structured logging is enabled the entry is also
//! written into a document wrapped in the configured root element, kept
//! well-formed by inserting each entry before the closing root tag.
//!
//! Writes are synchronous and serialized by this log's own lock; the predicate
//! store's locks are never involved.

use crate::config::ShareLogConfig;
use crate::error::ProcessorError;
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub struct ShareLog {
    xml_enabled: bool,
    xml_path: PathBuf,
    xml_root: String,
    plain_path: PathBuf,
    write_lock: Mutex<()>,
}

impl ShareLog {
    pub fn new(config: &ShareLogConfig) -> Self {
        Self {
            xml_enabled: config.xml_enabled,
            xml_path: config.xml_path.clone(),
            xml_root: config.xml_root.clone(),
            plain_path: config.plain_path.clone(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn xml_path(&self) -> &Path {
        &self.xml_path
    }

    pub fn plain_path(&self) -> &Path {
        &self.plain_path
    }

    /// Record one entry. Returns once every enabled destination has been written.
    pub fn record(&self, text: &str, user_id: &str, agent_id: &str) -> Result<(), ProcessorError> {
        let _guard = self.write_lock.lock();

        if self.xml_enabled {
            self.append_structured(&format!("{}\n", text))?;
        }
        self.append_plain(text, user_id, agent_id)?;

        tracing::info!(target: "parlance::gossip", user_id, agent_id, gossip = text, "Gossip recorded");
        Ok(())
    }

    fn append_plain(&self, text: &str, user_id: &str, agent_id: &str) -> Result<(), ProcessorError> {
        let path = &self.plain_path;
        ensure_parent(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| log_error(path, e))?;
        writeln!(
            file,
            "{} [{}/{}] {}",
            chrono::Utc::now().to_rfc3339(),
            agent_id,
            user_id,
            text
        )
        .map_err(|e| log_error(path, e))
    }

    fn append_structured(&self, entry: &str) -> Result<(), ProcessorError> {
        let path = &self.xml_path;
        ensure_parent(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| log_error(path, e))?;

        let mut existing = String::new();
        file.read_to_string(&mut existing)
            .map_err(|e| log_error(path, e))?;

        let closing = format!("</{}>", self.xml_root);
        let trimmed_len = existing.trim_end().len();
        let body = if existing[..trimmed_len].ends_with(&closing) {
            let insert_at = (trimmed_len - closing.len()) as u64;
            file.set_len(insert_at).map_err(|e| log_error(path, e))?;
            file.seek(SeekFrom::Start(insert_at))
                .map_err(|e| log_error(path, e))?;
            format!("{}{}\n", entry, closing)
        } else if existing.trim().is_empty() {
            file.set_len(0).map_err(|e| log_error(path, e))?;
            file.seek(SeekFrom::Start(0))
                .map_err(|e| log_error(path, e))?;
            format!("<{}>\n{}{}\n", self.xml_root, entry, closing)
        } else {
            // Not wrapped by us; keep appending rather than rewriting foreign content
            file.seek(SeekFrom::End(0))
                .map_err(|e| log_error(path, e))?;
            entry.to_string()
        };

        file.write_all(body.as_bytes())
            .map_err(|e| log_error(path, e))
    }
}

fn ensure_parent(path: &Path) -> Result<(), ProcessorError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| log_error(parent, e))
        }
        _ => Ok(()),
    }
}

fn log_error(path: &Path, source: std::io::Error) -> ProcessorError {
    ProcessorError::ShareLog {
        path: path.to_path_buf(),
        source,
    }
}
