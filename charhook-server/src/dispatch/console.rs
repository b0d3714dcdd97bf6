//! Console channel

use async_trait::async_trait;
use charhook_common::{Channel, EnrichedEvent};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::{DispatchError, NotificationChannel};

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes one human-readable line per event to a sink (stdout by default)
pub struct ConsoleChannel {
    sink: Sink,
}

impl ConsoleChannel {
    pub fn stdout() -> Self {
        Self::with_sink(io::stdout())
    }

    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }
}

/// Console line for an event
pub fn console_line(event: &EnrichedEvent) -> String {
    format!(
        "CONSOLE NOTIFICATION: New character added - {} (Level: {})",
        event.name, event.level
    )
}

#[async_trait]
impl NotificationChannel for ConsoleChannel {
    fn name(&self) -> &'static str {
        "console"
    }

    fn subscription(&self) -> Option<Channel> {
        Some(Channel::Console)
    }

    async fn deliver(&self, event: &EnrichedEvent) -> Result<(), DispatchError> {
        let line = console_line(event);
        let sink = Arc::clone(&self.sink);
        // Blocking write, kept off the async workers
        tokio::task::spawn_blocking(move || {
            let mut sink = sink
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "console sink poisoned"))?;
            writeln!(sink, "{}", line)?;
            sink.flush()
        })
        .await
        .map_err(|e| DispatchError::Console(io::Error::new(io::ErrorKind::Other, e)))?
        .map_err(DispatchError::Console)
    }
}
