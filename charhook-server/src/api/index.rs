//! Landing endpoint listing the available routes

use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        ("webhook", "POST /webhook/personnage - Receive character events"),
        ("subscribe", "GET/POST /subscribe - Manage notification subscriptions"),
        ("notifier", "GET /notifier - Render a badge"),
        ("traitement", "POST /traitement - Classify a character"),
        ("health", "GET /health - Service health"),
    ]);

    Json(IndexResponse {
        message: "Welcome to the character webhook API!".to_string(),
        endpoints,
    })
}
