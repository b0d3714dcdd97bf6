//! Notification dispatcher
//!
//! Fans one enriched event out to every enabled channel, in a fixed order:
//! console, file, remote badge, webhook. A failing channel is logged and
//! skipped; the remaining channels still run.

mod badge;
mod console;
mod file;
mod webhook;

pub use badge::{BadgeChannel, BadgeClient};
pub use console::ConsoleChannel;
pub use file::FileChannel;
pub use webhook::WebhookChannel;

use async_trait::async_trait;
use charhook_common::config::ServiceConfig;
use charhook_common::{Channel, EnrichedEvent};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::registry::SubscriptionRegistry;

/// Per-channel delivery errors
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Console write failed: {0}")]
    Console(std::io::Error),

    #[error("Notification file write failed: {0}")]
    File(std::io::Error),

    #[error("Badge lookup failed: {0}")]
    Badge(String),

    #[error("Badge lookup returned HTTP {0}")]
    BadgeStatus(u16),
}

/// One notification delivery mechanism
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Name used in logs and reports
    fn name(&self) -> &'static str;

    /// Registry toggle gating this channel, `None` if it always runs
    fn subscription(&self) -> Option<Channel>;

    async fn deliver(&self, event: &EnrichedEvent) -> Result<(), DispatchError>;
}

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

/// Sequential fan-out over the configured channels
pub struct Dispatcher {
    registry: Arc<SubscriptionRegistry>,
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl Dispatcher {
    /// Dispatcher over an explicit channel list, run in list order
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        channels: Vec<Box<dyn NotificationChannel>>,
    ) -> Self {
        Self { registry, channels }
    }

    /// Standard channel set: console (stdout), file, badge (if enabled), webhook
    pub fn from_config(
        config: &ServiceConfig,
        registry: Arc<SubscriptionRegistry>,
    ) -> Result<Self, DispatchError> {
        let mut channels: Vec<Box<dyn NotificationChannel>> = vec![
            Box::new(ConsoleChannel::stdout()),
            Box::new(FileChannel::new(config.notification_log.clone())),
        ];
        if config.badge.enabled {
            let client = BadgeClient::new(&config.badge_base_url(), config.badge.timeout())?;
            channels.push(Box::new(BadgeChannel::new(client)));
        }
        channels.push(Box::new(WebhookChannel));

        Ok(Self::new(registry, channels))
    }

    /// Channel names in delivery order
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Deliver `event` to every enabled channel
    ///
    /// Never fails: channel errors are logged and collected in the report.
    pub async fn dispatch(&self, event: &EnrichedEvent) -> DispatchReport {
        let subscriptions = self.registry.get_all().await;
        let mut report = DispatchReport::default();

        for channel in &self.channels {
            let enabled = channel
                .subscription()
                .map(|c| subscriptions.is_enabled(c))
                .unwrap_or(true);
            if !enabled {
                report.skipped.push(channel.name());
                continue;
            }

            match channel.deliver(event).await {
                Ok(()) => report.delivered.push(channel.name()),
                Err(e) => {
                    warn!(channel = channel.name(), nom = %event.name, "{}", e);
                    report.failed.push((channel.name(), e.to_string()));
                }
            }
        }

        debug!(
            nom = %event.name,
            delivered = ?report.delivered,
            skipped = ?report.skipped,
            failed = report.failed.len(),
            "Dispatch finished"
        );
        report
    }
}
