//! Badge endpoint

use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::badge::{render_badge, BadgeNotice};

#[derive(Debug, Deserialize)]
pub struct BadgeQuery {
    pub nom: Option<String>,
    pub niveau: Option<String>,
}

/// GET /notifier?nom=&niveau=
pub async fn notifier(Query(query): Query<BadgeQuery>) -> Json<BadgeNotice> {
    Json(render_badge(query.nom.as_deref(), query.niveau.as_deref()))
}
