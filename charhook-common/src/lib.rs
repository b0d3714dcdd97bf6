//! # Charhook Common Library
//!
//! Shared code for the character webhook service and its tools:
//! - Score tiers and the level classifier
//! - Event types (ingested, enriched, logged)
//! - Notification channels and subscription state
//! - Configuration loading
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod events;
pub mod tier;
pub mod time;

pub use error::{Error, Result};
pub use events::{Channel, EnrichedEvent, Event, LoggedEvent, Subscriptions};
pub use tier::{classify, Tier};
