//! Badge rendering for `GET /notifier`
//!
//! Pure function of the query parameters. The dispatcher's badge channel
//! reads the same payload back over HTTP.

use charhook_common::Tier;
use serde::{Deserialize, Serialize};

/// Message returned when no badge can be rendered
pub const NO_NOTIFICATION_MESSAGE: &str =
    "No notification to display. Use ?nom=XXX&niveau=YYY to try it out.";

/// Badge payload
///
/// `badge` and `display` are omitted from the JSON when no badge was rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeNotice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Render a badge for a character name and level
///
/// Both values must be present and non-empty, otherwise the generic
/// message is returned.
pub fn render_badge(name: Option<&str>, level: Option<&str>) -> BadgeNotice {
    match (non_empty(name), non_empty(level)) {
        (Some(name), Some(level)) => {
            let badge = Tier::badge_for(level);
            BadgeNotice {
                badge: Some(badge.to_string()),
                message: format!("Badge notification: {} reached level {}!", name, level),
                display: Some(format!("{} {} {}", badge, name, badge)),
            }
        }
        _ => BadgeNotice {
            badge: None,
            message: NO_NOTIFICATION_MESSAGE.to_string(),
            display: None,
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
