//! HTTP API handlers for charhook-server

pub mod health;
pub mod index;
pub mod notifier;
pub mod subscribe;
pub mod traitement;
pub mod webhook;

pub use health::health_routes;
pub use index::index;
pub use notifier::notifier;
pub use subscribe::{get_subscriptions, update_subscription};
pub use traitement::process_character;
pub use webhook::receive_character_event;
