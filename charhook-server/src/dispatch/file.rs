//! Notification file channel

use async_trait::async_trait;
use charhook_common::{time, Channel, EnrichedEvent};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::{DispatchError, NotificationChannel};

/// Appends one line per event to a text file
pub struct FileChannel {
    path: PathBuf,
}

impl FileChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Notification file line for an event, without the trailing newline
pub fn file_line(event: &EnrichedEvent, at: &DateTime<Utc>) -> String {
    format!(
        "{} - New character: {} - Score: {} - Level: {}",
        time::to_iso8601(at),
        event.name,
        event.score,
        event.level
    )
}

#[async_trait]
impl NotificationChannel for FileChannel {
    fn name(&self) -> &'static str {
        "file"
    }

    fn subscription(&self) -> Option<Channel> {
        Some(Channel::File)
    }

    async fn deliver(&self, event: &EnrichedEvent) -> Result<(), DispatchError> {
        let mut line = file_line(event, &time::now());
        line.push('\n');

        // Single write per line so concurrent appends do not interleave mid-line
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(DispatchError::File)?;
        file.write_all(line.as_bytes())
            .await
            .map_err(DispatchError::File)?;
        file.flush().await.map_err(DispatchError::File)
    }
}
