//! Event types for the character webhook
//!
//! Lifecycle:
//! - [`Event`] arrives in a webhook request and lives for that request only
//! - [`EnrichedEvent`] is built once per request by [`EnrichedEvent::from_event`]
//!   and then cloned into each background consumer; it is never mutated
//! - [`LoggedEvent`] is an enriched event stamped at persistence time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tier::{classify, Tier};
use crate::Error;

/// Raw character event as posted to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "nom")]
    pub name: String,
    pub score: i64,
}

impl Event {
    /// Reject events whose name is empty or whitespace
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("nom must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Event with its derived tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(rename = "nom")]
    pub name: String,
    pub score: i64,
    #[serde(rename = "niveau")]
    pub level: Tier,
}

impl EnrichedEvent {
    /// Classify an ingested event
    pub fn from_event(event: Event) -> Self {
        let level = classify(event.score);
        Self {
            name: event.name,
            score: event.score,
            level,
        }
    }

    /// Stamp this event for the persistent log
    pub fn stamped(self, timestamp: DateTime<Utc>) -> LoggedEvent {
        LoggedEvent {
            event: self,
            timestamp,
        }
    }
}

/// Enriched event as stored in the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    #[serde(flatten)]
    pub event: EnrichedEvent,
    /// Same fixed-precision format as the notification file
    #[serde(with = "crate::time::iso8601")]
    pub timestamp: DateTime<Utc>,
}

/// Notification channel that can be toggled through `/subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Console,
    File,
    Webhook,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Console, Channel::File, Channel::Webhook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Console => "console",
            Channel::File => "file",
            Channel::Webhook => "webhook",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| Error::InvalidChannel(s.to_string()))
    }
}

/// Enabled flag per notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriptions {
    pub console: bool,
    pub file: bool,
    pub webhook: bool,
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self {
            console: true,
            file: true,
            webhook: false,
        }
    }
}

impl Subscriptions {
    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Console => self.console,
            Channel::File => self.file,
            Channel::Webhook => self.webhook,
        }
    }

    pub fn set(&mut self, channel: Channel, active: bool) {
        match channel {
            Channel::Console => self.console = active,
            Channel::File => self.file = active,
            Channel::Webhook => self.webhook = active,
        }
    }
}
