//! Subscription registry
//!
//! Holds the enabled flag of each notification channel for the lifetime of
//! the process. Built once per server instance and shared through `AppState`.
//! Nothing is persisted: a restart returns to the defaults.

use charhook_common::{Channel, Subscriptions};
use tokio::sync::RwLock;

/// In-memory channel subscriptions
///
/// Read by every dispatch, written only by `POST /subscribe`.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    state: RwLock<Subscriptions>,
}

impl SubscriptionRegistry {
    pub fn new(initial: Subscriptions) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Snapshot of the current state
    pub async fn get_all(&self) -> Subscriptions {
        *self.state.read().await
    }

    /// Enable or disable a channel by name
    ///
    /// Unknown names fail with `InvalidChannel` and leave the state untouched.
    pub async fn set(&self, channel: &str, active: bool) -> charhook_common::Result<Subscriptions> {
        let channel: Channel = channel.parse()?;
        let mut state = self.state.write().await;
        state.set(channel, active);
        Ok(*state)
    }
}
