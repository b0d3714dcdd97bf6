//! Outbound webhook channel
//!
//! Recognized by the registry but without a delivery target yet; when
//! enabled it only reports that no webhook is configured.

use async_trait::async_trait;
use charhook_common::{Channel, EnrichedEvent};
use tracing::info;

use super::{DispatchError, NotificationChannel};

pub struct WebhookChannel;

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn subscription(&self) -> Option<Channel> {
        Some(Channel::Webhook)
    }

    async fn deliver(&self, event: &EnrichedEvent) -> Result<(), DispatchError> {
        info!(nom = %event.name, "Webhook notification not configured");
        Ok(())
    }
}
