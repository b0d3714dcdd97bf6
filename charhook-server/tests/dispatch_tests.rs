//! Integration tests for the notification fan-out
//!
//! Tests cover:
//! - Subscription gating per channel
//! - Per-channel error containment
//! - Remote badge lookup against a live local server
//! - Channel wiring from the service configuration
//! - The full post-response pipeline (persist, then dispatch)

use charhook_common::config::ServiceConfig;
use charhook_common::{EnrichedEvent, Event, Subscriptions};
use charhook_server::dispatch::{
    BadgeChannel, BadgeClient, ConsoleChannel, Dispatcher, FileChannel, NotificationChannel,
    WebhookChannel,
};
use charhook_server::pipeline::process_event;
use charhook_server::registry::SubscriptionRegistry;
use charhook_server::store::EventStore;
use charhook_server::{build_router, AppState};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn event(name: &str, score: i64) -> EnrichedEvent {
    EnrichedEvent::from_event(Event {
        name: name.to_string(),
        score,
    })
}

fn dispatcher(
    registry: Arc<SubscriptionRegistry>,
    console: &Captured,
    notification_log: &Path,
    badge: Option<BadgeClient>,
) -> Dispatcher {
    let mut channels: Vec<Box<dyn NotificationChannel>> = vec![
        Box::new(ConsoleChannel::with_sink(console.clone())),
        Box::new(FileChannel::new(notification_log.to_path_buf())),
    ];
    if let Some(client) = badge {
        channels.push(Box::new(BadgeChannel::new(client)));
    }
    channels.push(Box::new(WebhookChannel));
    Dispatcher::new(registry, channels)
}

/// Serve a badge-capable router on an ephemeral port
async fn spawn_badge_server(dir: &Path) -> SocketAddr {
    let registry = Arc::new(SubscriptionRegistry::default());
    let store = Arc::new(EventStore::new(dir.join("server_log.json")));
    let server_dispatcher = Arc::new(Dispatcher::new(registry.clone(), Vec::new()));
    let app = build_router(AppState::new(registry, store, server_dispatcher));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

#[tokio::test]
async fn test_console_disabled_file_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let notification_log = dir.path().join("notifications.txt");
    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::default());
    registry.set("console", false).await.unwrap();

    let dispatcher = dispatcher(registry, &console, &notification_log, None);
    let report = dispatcher.dispatch(&event("Sakura", 78)).await;

    assert_eq!(console.text(), "");
    let content = std::fs::read_to_string(&notification_log).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("Sakura - Score: 78 - Level: expert"));

    assert_eq!(report.delivered, vec!["file"]);
    assert_eq!(report.skipped, vec!["console", "webhook"]);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn test_file_failure_does_not_stop_later_channels() {
    let dir = tempfile::tempdir().unwrap();
    let unwritable = dir.path().join("missing-dir").join("notifications.txt");
    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::default());
    registry.set("webhook", true).await.unwrap();

    let dispatcher = dispatcher(registry, &console, &unwritable, None);
    let report = dispatcher.dispatch(&event("Itachi", 98)).await;

    assert_eq!(report.delivered, vec!["console", "webhook"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "file");
    assert!(console.text().contains("Itachi (Level: légendaire)"));
}

#[tokio::test]
async fn test_badge_lookup_against_live_server() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_badge_server(dir.path()).await;

    let client = BadgeClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let notice = client.lookup("Rock Lee", "intermédiaire").await.unwrap();
    assert_eq!(
        notice.display.as_deref(),
        Some("🔹 INTERMÉDIAIRE 🔹 Rock Lee 🔹 INTERMÉDIAIRE 🔹")
    );

    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::default());
    let dispatcher = dispatcher(registry, &console, &dir.path().join("n.txt"), Some(client));
    let report = dispatcher.dispatch(&event("Jiraiya", 91)).await;

    assert_eq!(report.delivered, vec!["console", "file", "badge"]);
    assert_eq!(report.skipped, vec!["webhook"]);
}

#[tokio::test]
async fn test_unreachable_badge_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let client =
        BadgeClient::new(&format!("http://{}", unused_addr()), Duration::from_millis(500)).unwrap();

    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::new(Subscriptions {
        console: true,
        file: true,
        webhook: true,
    }));
    let dispatcher = dispatcher(registry, &console, &dir.path().join("n.txt"), Some(client));
    let report = dispatcher.dispatch(&event("Tsunade", 93)).await;

    assert_eq!(report.delivered, vec!["console", "file", "webhook"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "badge");
}

fn config_in(dir: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.event_log = dir.join("webhook_log.json");
    config.notification_log = dir.join("notifications.txt");
    config.badge.timeout_ms = 500;
    config
}

#[tokio::test]
async fn test_configured_channels_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.badge.base_url = Some(format!("http://{}", unused_addr()));

    let registry = Arc::new(SubscriptionRegistry::default());
    let dispatcher = Dispatcher::from_config(&config, registry).unwrap();
    assert_eq!(
        dispatcher.channel_names(),
        vec!["console", "file", "badge", "webhook"]
    );

    let report = dispatcher.dispatch(&event("Kakashi", 95)).await;
    assert_eq!(report.delivered, vec!["console", "file"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "badge");
    assert_eq!(report.skipped, vec!["webhook"]);

    let content = std::fs::read_to_string(&config.notification_log).unwrap();
    assert!(content.contains("Kakashi - Score: 95 - Level: légendaire"));
}

#[tokio::test]
async fn test_disabled_badge_is_not_wired() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.badge.enabled = false;

    let registry = Arc::new(SubscriptionRegistry::default());
    let dispatcher = Dispatcher::from_config(&config, registry).unwrap();
    assert_eq!(dispatcher.channel_names(), vec!["console", "file", "webhook"]);

    let report = dispatcher.dispatch(&event("Shikamaru", 88)).await;
    assert_eq!(report.delivered, vec!["console", "file"]);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn test_app_state_from_config_uses_configured_paths() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.badge.enabled = false;

    let state = AppState::from_config(&config).unwrap();
    assert_eq!(state.store.path(), config.event_log.as_path());
    assert_eq!(state.registry.get_all().await, Subscriptions::default());
    assert_eq!(
        state.dispatcher.channel_names(),
        vec!["console", "file", "webhook"]
    );

    let report = process_event(&state.store, &state.dispatcher, event("Gaara", 89)).await;
    assert_eq!(report.delivered, vec!["console", "file"]);
    assert_eq!(state.store.entries().await.unwrap().len(), 1);
    assert!(config.notification_log.exists());
}

#[tokio::test]
async fn test_pipeline_persists_even_when_channels_fail() {
    let dir = tempfile::tempdir().unwrap();
    let store = EventStore::new(dir.path().join("webhook_log.json"));
    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::default());
    let dispatcher = dispatcher(
        registry,
        &console,
        &dir.path().join("absent").join("n.txt"),
        None,
    );

    let report = process_event(&store, &dispatcher, event("Naruto", 85)).await;

    assert_eq!(report.failed.len(), 1);
    let entries = store.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event, event("Naruto", 85));
}

#[tokio::test]
async fn test_pipeline_dispatches_when_persistence_fails() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the log file should be makes every write fail
    let log_path = dir.path().join("log-is-a-dir");
    std::fs::create_dir(&log_path).unwrap();
    let store = EventStore::new(&log_path);

    let console = Captured::default();
    let registry = Arc::new(SubscriptionRegistry::default());
    let notification_log = dir.path().join("n.txt");
    let dispatcher = dispatcher(registry, &console, &notification_log, None);

    let report = process_event(&store, &dispatcher, event("Hinata", 72)).await;

    assert_eq!(report.delivered, vec!["console", "file"]);
    assert!(console.text().contains("Hinata"));
    assert!(notification_log.exists());
}
