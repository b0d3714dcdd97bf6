//! Synchronous classification endpoint
//!
//! Same classifier as the webhook, without persistence or notifications.

use axum::Json;
use charhook_common::{classify, Event, Tier};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ProcessingRequest {
    pub nom: String,
    pub score: i64,
    pub score_double: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProcessingResponse {
    pub nom: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_double: Option<i64>,
    pub niveau: Tier,
}

/// POST /traitement
pub async fn process_character(
    Json(request): Json<ProcessingRequest>,
) -> ApiResult<Json<ProcessingResponse>> {
    Event {
        name: request.nom.clone(),
        score: request.score,
    }
    .validate()?;

    Ok(Json(ProcessingResponse {
        niveau: classify(request.score),
        nom: request.nom,
        score: request.score,
        score_double: request.score_double,
    }))
}
