//! Append-only JSON event log
//!
//! The log is a single pretty-printed JSON array. Appends are best-effort:
//! a missing, empty or unparsable file counts as "no history" and is
//! overwritten with the new entry alone.
//!
//! Appends within one process are serialized by an async mutex, and every
//! write goes through a temporary file renamed over the log.

use charhook_common::LoggedEvent;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Event log errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Event log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event log serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed event log
#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, rewriting the whole log
    ///
    /// Returns the number of entries now in the log.
    pub async fn append(&self, entry: &LoggedEvent) -> Result<usize, PersistenceError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_history().await?;
        entries.push(serde_json::to_value(entry)?);

        let body = serde_json::to_string_pretty(&entries)?;
        self.write_atomic(body.as_bytes()).await?;

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Event appended to log"
        );
        Ok(entries.len())
    }

    /// Read every event entry currently in the log
    ///
    /// Corrupt content reads as an empty log, same as for [`append`](Self::append).
    /// Entries of another shape are kept on disk but skipped here.
    pub async fn entries(&self) -> Result<Vec<LoggedEvent>, PersistenceError> {
        let values = self.read_history().await?;
        let mut entries = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!(
                    path = %self.path.display(),
                    index,
                    error = %e,
                    "Skipping log entry that is not a character event"
                ),
            }
        }
        Ok(entries)
    }

    /// Existing entries as raw JSON, so foreign shapes survive a rewrite
    async fn read_history(&self) -> Result<Vec<Value>, PersistenceError> {
        // Bytes, not a String: a write cut inside a multi-byte character is
        // corruption to discard, not an I/O failure
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Value>(&content) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!(
                    path = %self.path.display(),
                    "Event log is not a JSON array, starting a new log"
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Event log is not valid JSON, starting a new log"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_atomic(&self, body: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.temp_path();
        tokio::fs::write(&tmp_path, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "events.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
