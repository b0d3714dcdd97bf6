//! charhook-sim - posts sample character events to the webhook
//!
//! Sends the fixed roster one event at a time with a pause in between, or
//! a single random character with `--random`. Failures are reported and the
//! run continues.

use std::time::Duration;

use anyhow::{Context, Result};
use charhook_common::Event;
use clap::Parser;
use rand::seq::SliceRandom;
use serde_json::Value;
use tracing::{error, info, warn};

const ROSTER: [(&str, i64); 10] = [
    ("Naruto", 85),
    ("Sasuke", 87),
    ("Sakura", 78),
    ("Kakashi", 95),
    ("Hinata", 72),
    ("Gaara", 89),
    ("Rock Lee", 68),
    ("Itachi", 98),
    ("Jiraiya", 91),
    ("Tsunade", 93),
];

/// Command-line arguments for charhook-sim
#[derive(Parser, Debug)]
#[command(name = "charhook-sim")]
#[command(about = "Send sample character events to a charhook webhook")]
#[command(version)]
struct Args {
    /// Base URL of the charhook server
    #[arg(short, long, default_value = "http://127.0.0.1:8000", env = "CHARHOOK_URL")]
    url: String,

    /// Pause between events in milliseconds
    #[arg(short, long, default_value = "1000")]
    delay_ms: u64,

    /// Send one random character instead of the whole roster
    #[arg(long)]
    random: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let endpoint = format!("{}/webhook/personnage", args.url.trim_end_matches('/'));
    info!("Webhook event simulator, target {}", endpoint);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let events: Vec<Event> = if args.random {
        let (name, score) = ROSTER
            .choose(&mut rand::thread_rng())
            .copied()
            .context("Roster is empty")?;
        vec![roster_event(name, score)]
    } else {
        ROSTER
            .iter()
            .map(|&(name, score)| roster_event(name, score))
            .collect()
    };

    let total = events.len();
    let mut sent = 0usize;
    for (i, event) in events.iter().enumerate() {
        if send_event(&client, &endpoint, event).await {
            sent += 1;
        }
        if i + 1 < total {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }
    }

    info!("Simulation finished: {} sent, {} failed", sent, total - sent);
    Ok(())
}

fn roster_event(name: &str, score: i64) -> Event {
    Event {
        name: name.to_string(),
        score,
    }
}

/// Post one event; returns whether the server accepted it
async fn send_event(client: &reqwest::Client, endpoint: &str, event: &Event) -> bool {
    info!("Sending event for {} (score: {})", event.name, event.score);

    let response = match client.post(endpoint).json(event).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Connection error: {}", e);
            return false;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Event rejected with status {}: {}", status, body);
        return false;
    }

    match response.json::<Value>().await {
        Ok(body) => {
            let pretty = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
            info!("Response received:\n{}", pretty);
            true
        }
        Err(e) => {
            warn!("Event accepted but response was not JSON: {}", e);
            true
        }
    }
}
