//! Remote badge channel
//!
//! Calls a sibling `GET /notifier` endpoint with the event's name and level
//! and logs the display string it returns. Best-effort: every request is
//! bounded by the configured timeout, and failures only produce a warning.

use async_trait::async_trait;
use charhook_common::{Channel, EnrichedEvent};
use std::time::Duration;
use tracing::info;

use super::{DispatchError, NotificationChannel};
use crate::badge::BadgeNotice;

const USER_AGENT: &str = concat!("charhook-server/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the badge endpoint
#[derive(Debug, Clone)]
pub struct BadgeClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl BadgeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DispatchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Badge(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/notifier", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the badge for a name and level
    pub async fn lookup(&self, name: &str, level: &str) -> Result<BadgeNotice, DispatchError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("nom", name), ("niveau", level)])
            .send()
            .await
            .map_err(|e| DispatchError::Badge(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::BadgeStatus(status.as_u16()));
        }

        response
            .json::<BadgeNotice>()
            .await
            .map_err(|e| DispatchError::Badge(e.to_string()))
    }
}

/// Channel wrapper around [`BadgeClient`]; not subscription-gated
pub struct BadgeChannel {
    client: BadgeClient,
}

impl BadgeChannel {
    pub fn new(client: BadgeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationChannel for BadgeChannel {
    fn name(&self) -> &'static str {
        "badge"
    }

    fn subscription(&self) -> Option<Channel> {
        None
    }

    async fn deliver(&self, event: &EnrichedEvent) -> Result<(), DispatchError> {
        let notice = self.client.lookup(&event.name, event.level.label()).await?;
        info!(
            nom = %event.name,
            "Badge generated: {}",
            notice.display.as_deref().unwrap_or("unavailable")
        );
        Ok(())
    }
}
