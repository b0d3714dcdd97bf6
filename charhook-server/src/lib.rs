//! charhook-server library - character webhook and notification service
//!
//! Receives character events, classifies them, and hands them to
//! background jobs that persist them and fan them out to notification
//! channels.

use axum::Router;
use charhook_common::config::ServiceConfig;
use charhook_common::Subscriptions;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod badge;
pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod store;
pub mod tasks;

use dispatch::{DispatchError, Dispatcher};
use registry::SubscriptionRegistry;
use store::EventStore;
use tasks::BackgroundTasks;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Channel subscriptions, shared with the dispatcher
    pub registry: Arc<SubscriptionRegistry>,
    /// JSON event log
    pub store: Arc<EventStore>,
    pub dispatcher: Arc<Dispatcher>,
    /// Post-response jobs, drained on shutdown
    pub tasks: BackgroundTasks,
}

impl AppState {
    /// Create new application state
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        store: Arc<EventStore>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            registry,
            store,
            dispatcher,
            tasks: BackgroundTasks::new(),
        }
    }

    /// State wired from configuration, with default subscriptions
    pub fn from_config(config: &ServiceConfig) -> Result<Self, DispatchError> {
        let registry = Arc::new(SubscriptionRegistry::new(Subscriptions::default()));
        let store = Arc::new(EventStore::new(config.event_log.clone()));
        let dispatcher = Arc::new(Dispatcher::from_config(config, registry.clone())?);
        Ok(Self::new(registry, store, dispatcher))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::index))
        .route("/webhook/personnage", post(api::receive_character_event))
        .route(
            "/subscribe",
            get(api::get_subscriptions).post(api::update_subscription),
        )
        .route("/notifier", get(api::notifier))
        .route("/traitement", post(api::process_character))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
