//! Song resolution and playback
//!
//! Resolves a spoken song request to the top YouTube search result and opens
//! the matching YouTube Music URL in the default browser. Allowed to block on
//! network I/O; one attempt, no retry.

use crate::apps;
use crate::error::VesperResult;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

const RESULTS_URL: &str = "https://www.youtube.com/results?search_query=";
const WATCH_URL: &str = "https://music.youtube.com/watch?v=";

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r#""videoId":"([A-Za-z0-9_-]{11})""#).unwrap();
    static ref VIDEO_TITLE: Regex =
        Regex::new(r#""title":\{"runs":\[\{"text":"([^"]+)""#).unwrap();
}

/// Search for the query, open the top result on YouTube Music, and report.
pub async fn resolve_and_play(client: &Client, query: &str) -> String {
    let url = format!("{}{}", RESULTS_URL, urlencoding::encode(query));
    debug!("Resolving song via: {}", url);

    let html = match fetch(client, &url).await {
        Ok(html) => html,
        Err(e) => return format!("✗ Playback failed: {}", e),
    };

    match extract_first_video(&html) {
        Some((video_id, title)) => {
            let watch_url = format!("{}{}", WATCH_URL, video_id);
            match apps::open_url(&watch_url) {
                Ok(()) => format!("▶ Playing on YouTube Music: {}", title),
                Err(e) => format!("✗ Playback failed: {}", e),
            }
        }
        None => format!("✗ Playback failed: no results for {}", query),
    }
}

async fn fetch(client: &Client, url: &str) -> VesperResult<String> {
    let response = client.get(url).send().await?;
    Ok(response.text().await?)
}

/// First video id and title from the embedded search-results JSON.
/// Title falls back to "track" when the id is present but the title is not.
fn extract_first_video(html: &str) -> Option<(String, String)> {
    let video_id = VIDEO_ID.captures(html)?.get(1)?.as_str().to_string();
    let title = VIDEO_TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "track".to_string());
    Some((video_id, title))
}
