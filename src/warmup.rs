//! Warm-up probe
//!
//! A crude readiness probe: GET the site, log the result, sleep, GET once
//! more, log again. Exactly two attempts with a fixed delay; neither outcome
//! gates anything downstream.

use std::time::Duration;
use tracing::info;

const BODY_PREVIEW_LIMIT: usize = 200;

/// Issue the two warm-up GETs against `url`, `delay` apart.
pub async fn warm_up(client: &reqwest::Client, url: &str, delay: Duration) {
    info!("🔥 Warming up {}...", url);
    probe(client, url).await;

    tokio::time::sleep(delay).await;

    info!("🔥 CURLing {}...", url);
    probe(client, url).await;
}

async fn probe(client: &reqwest::Client, url: &str) {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            info!("   Status: {}", status);
            info!("   Body: {}", preview(&body));
        }
        Err(e) => {
            info!("   No response: {}", e);
        }
    }
}

fn preview(body: &str) -> &str {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    }
}
