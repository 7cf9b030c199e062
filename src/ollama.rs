//! Ollama AI Integration
//!
//! Optional LLM fallback for utterances the keyword classifier cannot place.
//! Asks a local Ollama model to convert natural speech to a JSON command and
//! maps the result back onto the typed intent/parameter model.

use crate::intent::Intent;
use crate::params::{LockAction, MediaAction, Params, VolumeAction};
use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Ollama API response envelope
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Command parsed out of the model's JSON reply
#[derive(Debug, Deserialize)]
struct ParsedCommand {
    intent: String,
    #[serde(default)]
    params: serde_json::Map<String, Value>,
}

/// Handles Ollama LLM integration for fallback command parsing
#[derive(Clone)]
pub struct OllamaParser {
    url: String,
    model: String,
    enabled: bool,
}

impl OllamaParser {
    /// Create new Ollama parser from config
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            url: config.ollama_url.clone(),
            model: config.ollama_model.clone(),
            enabled: config.ollama_enabled,
        }
    }

    /// Check if Ollama fallback is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Health check - verify Ollama is reachable
    pub async fn health_check(&self) -> bool {
        if !self.enabled {
            return false;
        }

        let client = reqwest::Client::new();
        match client
            .get(format!("{}/api/tags", self.url))
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Parse an utterance into an intent and parameter set.
    ///
    /// Returns None when disabled, unreachable, or when the model cannot
    /// produce a usable command.
    pub async fn parse_command(&self, text: &str) -> Result<Option<(Intent, Params)>> {
        if !self.enabled {
            return Ok(None);
        }

        let prompt = build_prompt(text);

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/api/generate", self.url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "format": "json",
                "options": {
                    "temperature": 0.1,
                    "num_predict": 150
                }
            }))
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Ollama API Error ({}): {}", status, body_text);
            return Ok(None);
        }

        debug!("🧠 Ollama raw body: {}", body_text);

        let ollama_resp: OllamaResponse = match serde_json::from_str(&body_text) {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "❌ Failed to deserialize Ollama response: {} - Body: {}",
                    e, body_text
                );
                return Ok(None);
            }
        };

        Ok(parse_command_response(&ollama_resp.response))
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"You are a command parser for a voice assistant. Convert the user's natural speech to a JSON command.

AVAILABLE COMMANDS:
- VOLUME: increase/decrease/mute/unmute/set/get (with level 0-100)
- MEDIA: play/pause/next/previous (with optional song)
- APP: open any application (with app_name)
- SEARCH: web search (with query)
- BRIGHTNESS: adjust brightness
- LOCK: lock/sleep/shutdown
- SCREENSHOT: take screenshot
- REMINDER: set reminder (with text)
- TIME: get current time

USER SAYS: "{text}"

Return ONLY valid JSON with "intent" and "params" keys. Example:
{{"intent": "VOLUME", "params": {{"action": "increase"}}}}"#
    )
}

/// Extract the JSON command from the model output (the model may wrap it in
/// extra prose) and map it onto the typed command model.
fn parse_command_response(response: &str) -> Option<(Intent, Params)> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    let json_str = &response[start..=end];

    let parsed: ParsedCommand = match serde_json::from_str(json_str) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("❌ Failed to parse Ollama command: {} - Raw: {}", e, json_str);
            return None;
        }
    };

    let intent = intent_from_label(&parsed.intent)?;
    let params = params_from_json(intent, &parsed.params);
    Some((intent, params))
}

fn intent_from_label(label: &str) -> Option<Intent> {
    match label.to_uppercase().as_str() {
        "VOLUME" => Some(Intent::Volume),
        "MEDIA" => Some(Intent::Media),
        "APP" => Some(Intent::App),
        "SEARCH" => Some(Intent::Search),
        "BRIGHTNESS" => Some(Intent::Brightness),
        "LOCK" => Some(Intent::Lock),
        "SCREENSHOT" => Some(Intent::Screenshot),
        "REMINDER" => Some(Intent::Reminder),
        "TIME" => Some(Intent::Time),
        _ => None,
    }
}

fn params_from_json(intent: Intent, params: &serde_json::Map<String, Value>) -> Params {
    let action = params.get("action").and_then(Value::as_str).unwrap_or("");

    match intent {
        Intent::Volume => Params::Volume {
            action: match action {
                "increase" | "up" => VolumeAction::Increase,
                "decrease" | "down" => VolumeAction::Decrease,
                "mute" => VolumeAction::Mute,
                "unmute" => VolumeAction::Unmute,
                "get" => VolumeAction::Get,
                _ => VolumeAction::Set,
            },
            level: params.get("level").and_then(level_from_value),
        },
        Intent::Media => Params::Media {
            action: match action {
                "play" | "resume" => Some(MediaAction::Play),
                "pause" | "stop" => Some(MediaAction::Pause),
                "next" => Some(MediaAction::Next),
                "previous" => Some(MediaAction::Previous),
                _ => None,
            },
            song: string_param(params, "song"),
        },
        Intent::App => Params::App {
            app_name: string_param(params, "app_name"),
        },
        Intent::Search => Params::Search {
            query: string_param(params, "query").unwrap_or_default(),
        },
        Intent::Lock => Params::Lock {
            action: match action {
                "sleep" => LockAction::Sleep,
                "shutdown" => LockAction::Shutdown,
                _ => LockAction::Lock,
            },
        },
        Intent::Reminder => Params::Reminder {
            text: string_param(params, "text"),
        },
        Intent::About => Params::About,
        Intent::Brightness => Params::Brightness,
        Intent::Screenshot => Params::Screenshot,
        Intent::Time => Params::Time,
        Intent::Unknown => Params::Unknown,
    }
}

fn string_param(params: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Models emit levels as numbers or quoted strings; accept both.
fn level_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
