//! Post-response processing of a webhook event
//!
//! Persistence runs first, then the fan-out. Each step works on its own
//! copy of the enriched event, and a persistence failure does not stop
//! the dispatch.

use charhook_common::{time, EnrichedEvent};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::dispatch::{DispatchReport, Dispatcher};
use crate::store::EventStore;
use crate::AppState;

/// Record `event` in the log, then notify subscribers
pub async fn process_event(
    store: &EventStore,
    dispatcher: &Dispatcher,
    event: EnrichedEvent,
) -> DispatchReport {
    let logged = event.clone().stamped(time::now());
    match store.append(&logged).await {
        Ok(entries) => info!(
            path = %store.path().display(),
            entries,
            "Event recorded"
        ),
        Err(e) => warn!(path = %store.path().display(), "Failed to record event: {}", e),
    }

    dispatcher.dispatch(&event).await
}

/// Schedule [`process_event`] as a tracked background job
///
/// Returns immediately; the job id only serves log correlation.
pub fn schedule(state: &AppState, event: EnrichedEvent) -> Uuid {
    let job_id = Uuid::new_v4();
    let span = info_span!("webhook_job", %job_id, nom = %event.name);
    let store = state.store.clone();
    let dispatcher = state.dispatcher.clone();

    state.tasks.spawn(
        "webhook_job",
        async move {
            process_event(&store, &dispatcher, event).await;
        }
        .instrument(span),
    );
    job_id
}
