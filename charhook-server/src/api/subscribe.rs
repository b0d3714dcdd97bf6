//! Subscription management endpoints

use axum::{extract::State, Json};
use charhook_common::Subscriptions;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

/// Body of `POST /subscribe`
#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    /// Channel name: "console", "file" or "webhook"
    #[serde(rename = "type")]
    pub channel: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionUpdateResponse {
    pub message: String,
    pub subscriptions: Subscriptions,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionsResponse {
    pub subscriptions: Subscriptions,
}

/// POST /subscribe
///
/// Unknown channel names are rejected with 400.
pub async fn update_subscription(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionRequest>,
) -> ApiResult<Json<SubscriptionUpdateResponse>> {
    let subscriptions = state.registry.set(&request.channel, request.active).await?;

    let verb = if request.active { "enabled" } else { "disabled" };
    info!(channel = %request.channel, active = request.active, "Subscription updated");

    Ok(Json(SubscriptionUpdateResponse {
        message: format!("Notification {} {}", request.channel, verb),
        subscriptions,
    }))
}

/// GET /subscribe
pub async fn get_subscriptions(State(state): State<AppState>) -> Json<SubscriptionsResponse> {
    Json(SubscriptionsResponse {
        subscriptions: state.registry.get_all().await,
    })
}
