//! Webhook ingress for character events
//!
//! The handler only validates and classifies. Persistence and dispatch are
//! scheduled as a background job and may still be running when the
//! response is sent.

use axum::{extract::State, Json};
use charhook_common::{EnrichedEvent, Event};
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::{pipeline, AppState};

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: String,
    pub personnage: EnrichedEvent,
}

/// POST /webhook/personnage
pub async fn receive_character_event(
    State(state): State<AppState>,
    Json(event): Json<Event>,
) -> ApiResult<Json<WebhookResponse>> {
    event.validate()?;
    info!(nom = %event.name, score = event.score, "Character event received");

    let enriched = EnrichedEvent::from_event(event);
    let job_id = pipeline::schedule(&state, enriched.clone());
    info!(
        %job_id,
        nom = %enriched.name,
        niveau = %enriched.level,
        "Event classified, side effects scheduled"
    );

    Ok(Json(WebhookResponse {
        message: format!("Event received for character {}", enriched.name),
        personnage: enriched,
    }))
}
