//! Command dispatch
//!
//! Routes each classified command to exactly one handler. Every handler
//! performs one side effect and returns a human-readable status string,
//! success-marked with ✓ (or an action glyph) and failure-marked with ✗.
//! No error crosses a handler boundary.

use crate::apps;
use crate::config::Config;
use crate::error::{VesperError, VesperResult};
use crate::input::VirtualKeyboard;
use crate::intent::{classify, Intent};
use crate::music;
use crate::ollama::OllamaParser;
use crate::params::{extract, LockAction, MediaAction, Params, VolumeAction};
use crate::search;
use crate::volume::{PactlVolume, VolumeControl};
use evdev::Key;
use reqwest::Client;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info, warn};

const UNKNOWN_MESSAGE: &str =
    "❓ Command not recognized. Try: volume up, open notepad, search python, play music";
const DEFAULT_VOLUME_LEVEL: u32 = 50;

/// Owns the long-lived collaborator handles and routes commands to handlers
pub struct Dispatcher {
    volume: Box<dyn VolumeControl>,
    keyboard: Option<VirtualKeyboard>,
    http: Client,
    ollama: OllamaParser,
    app_aliases: HashMap<String, String>,
    screenshot_dir: PathBuf,
    search_timeout_secs: u64,
    wake_word: String,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Self {
        // Virtual keyboard needs uinput access; run without media keys and
        // the lock hotkey if it cannot be created.
        let keyboard = match VirtualKeyboard::new() {
            Ok(kb) => Some(kb),
            Err(e) => {
                warn!("⚠️ Could not create virtual keyboard: {}", e);
                warn!("   Run with: sudo vesper or add user to 'input' group");
                None
            }
        };

        Self {
            volume: Box::new(PactlVolume::new(config.volume_step_percent)),
            keyboard,
            http: Client::new(),
            ollama: OllamaParser::new(config),
            app_aliases: config.app_aliases.clone(),
            screenshot_dir: PathBuf::from(&config.screenshot_dir),
            search_timeout_secs: config.search_timeout_secs,
            wake_word: config
                .wake_words
                .first()
                .cloned()
                .unwrap_or_else(|| "vesper".to_string()),
        }
    }

    /// Full pipeline for one utterance: classify, extract, dispatch.
    ///
    /// When the keyword classifier yields Unknown and the Ollama fallback is
    /// enabled, the utterance gets one shot at the LLM parser before the
    /// not-recognized handler.
    pub async fn run(&mut self, utterance: &str) -> String {
        info!("Processing: {}", utterance);

        let mut intent = classify(utterance);
        let mut params = extract(utterance, intent);

        if intent == Intent::Unknown && self.ollama.is_enabled() {
            match self.ollama.parse_command(utterance).await {
                Ok(Some((ai_intent, ai_params))) => {
                    info!("🧠 Ollama fallback intent: {}", ai_intent);
                    intent = ai_intent;
                    params = ai_params;
                }
                Ok(None) => debug!("Ollama fallback produced no command"),
                Err(e) => warn!("Ollama fallback failed: {}", e),
            }
        }

        info!("Intent: {}", intent);
        debug!("Parameters: {:?}", params);

        let result = self.dispatch(params).await;
        info!("Result: {}", result);
        result
    }

    /// Route a parameter set to its handler.
    pub async fn dispatch(&mut self, params: Params) -> String {
        match params {
            Params::Volume { action, level } => self.handle_volume(action, level).await,
            Params::Media { action, song } => self.handle_media(action, song).await,
            Params::App { app_name } => self.handle_app(app_name),
            Params::Search { query } => self.handle_search(&query).await,
            Params::About => self.handle_about(),
            Params::Brightness => Self::handle_brightness().await,
            Params::Lock { action } => self.handle_lock(action).await,
            Params::Screenshot => self.handle_screenshot().await,
            Params::Reminder { text } => Self::handle_reminder(text),
            Params::Time => Self::handle_time(),
            Params::Unknown => UNKNOWN_MESSAGE.to_string(),
        }
    }

    async fn handle_volume(&self, action: VolumeAction, level: Option<u32>) -> String {
        let result = match action {
            VolumeAction::Increase => self
                .volume
                .volume_up()
                .await
                .map(|_| "✓ Volume increased".to_string()),
            VolumeAction::Decrease => self
                .volume
                .volume_down()
                .await
                .map(|_| "✓ Volume decreased".to_string()),
            VolumeAction::Mute => self.volume.mute().await.map(|_| "✓ Muted".to_string()),
            VolumeAction::Unmute => self.volume.unmute().await.map(|_| "✓ Unmuted".to_string()),
            VolumeAction::Set => {
                let level = level.unwrap_or(DEFAULT_VOLUME_LEVEL);
                self.volume
                    .volume_to(level as f32 / 100.0)
                    .await
                    .map(|_| format!("✓ Volume set to {}%", level))
            }
            VolumeAction::Get => self
                .volume
                .get_volume()
                .await
                .map(|current| format!("Current volume: {}%", current)),
        };

        result.unwrap_or_else(|e| format!("✗ Volume control failed: {}", e))
    }

    async fn handle_media(&mut self, action: Option<MediaAction>, song: Option<String>) -> String {
        let action = action.unwrap_or(MediaAction::Play);

        if action == MediaAction::Play {
            if let Some(song) = song {
                return music::resolve_and_play(&self.http, &song).await;
            }
        }

        let (key, message) = match action {
            MediaAction::Play => (Key::KEY_PLAYPAUSE, "▶ Play"),
            MediaAction::Pause => (Key::KEY_PLAYPAUSE, "⏸ Paused"),
            MediaAction::Next => (Key::KEY_NEXTSONG, "⏭ Next track"),
            MediaAction::Previous => (Key::KEY_PREVIOUSSONG, "⏮ Previous track"),
        };

        match self.tap_key(key) {
            Ok(()) => message.to_string(),
            Err(e) => format!("✗ Media control failed: {}", e),
        }
    }

    fn handle_app(&self, app_name: Option<String>) -> String {
        let name = app_name.unwrap_or_default();
        if name.is_empty() {
            return "✗ Could not open app: no application name heard".to_string();
        }

        let command = apps::resolve(&name, &self.app_aliases);
        match apps::launch(&command) {
            Ok(()) => format!("✓ Opening {}", name),
            Err(e) => format!("✗ Could not open {}: {}", name, e),
        }
    }

    async fn handle_search(&self, query: &str) -> String {
        // A concise instant answer skips the browser entirely.
        if let Some(answer) =
            search::instant_answer(&self.http, query, self.search_timeout_secs).await
        {
            return format!("🔎 {}\n\n{}", query, answer);
        }

        let url = search::web_search_url(query);
        match apps::open_url(&url) {
            Ok(()) => format!("🔍 Searching for: {}", query),
            Err(e) => format!("✗ Search failed: {}", e),
        }
    }

    async fn handle_brightness() -> String {
        // Exit status is not checked; brightnessctl reports via stderr only.
        match Command::new("brightnessctl")
            .args(["set", "+10%"])
            .output()
            .await
        {
            Ok(_) => "💡 Brightness adjusted".to_string(),
            Err(e) => format!("✗ Brightness control failed: {}", e),
        }
    }

    async fn handle_lock(&mut self, action: LockAction) -> String {
        match action {
            LockAction::Lock => match self.lock_hotkey() {
                Ok(()) => "🔒 Desktop locked".to_string(),
                Err(e) => format!("✗ Lock failed: {}", e),
            },
            LockAction::Sleep => match Command::new("systemctl").arg("suspend").spawn() {
                Ok(_) => "😴 Suspending".to_string(),
                Err(e) => format!("✗ Sleep failed: {}", e),
            },
            LockAction::Shutdown => match Command::new("shutdown").args(["-h", "+1"]).spawn() {
                Ok(_) => "⏻ Shutdown scheduled (1 minute)".to_string(),
                Err(e) => format!("✗ Shutdown failed: {}", e),
            },
        }
    }

    async fn handle_screenshot(&self) -> String {
        let filename = format!(
            "screenshot_{}.png",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.screenshot_dir.join(filename);

        match Command::new("gnome-screenshot")
            .arg("-f")
            .arg(&path)
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                format!("📸 Screenshot saved as {}", path.display())
            }
            Ok(output) => format!(
                "✗ Screenshot failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) => format!("✗ Screenshot failed: {}", e),
        }
    }

    fn handle_reminder(text: Option<String>) -> String {
        // Stub: echoes the reminder, schedules nothing.
        let text = text.unwrap_or_else(|| "Remember this".to_string());
        format!("⏰ Reminder set: {}", text)
    }

    fn handle_time() -> String {
        let now = chrono::Local::now();
        format!(
            "🕐 {}\n📅 {}",
            now.format("%I:%M %p"),
            now.format("%A, %B %d, %Y")
        )
    }

    fn handle_about(&self) -> String {
        format!(
            "Hi, I'm {name}, this desktop's assistant. I can control system volume, \
             open apps, run quick web searches, set reminders, take screenshots, \
             and more. Say '{name}' followed by your command.",
            name = self.wake_word
        )
    }

    fn tap_key(&mut self, key: Key) -> VesperResult<()> {
        let keyboard = self
            .keyboard
            .as_mut()
            .ok_or_else(|| VesperError::Input("no virtual keyboard available".to_string()))?;
        keyboard.tap_key(key)
    }

    fn lock_hotkey(&mut self) -> VesperResult<()> {
        let keyboard = self
            .keyboard
            .as_mut()
            .ok_or_else(|| VesperError::Input("no virtual keyboard available".to_string()))?;
        keyboard.key_combo(&[Key::KEY_LEFTMETA], Key::KEY_L)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_reminder_echoes_text() {
        assert_eq!(
            Dispatcher::handle_reminder(Some("water the plants".to_string())),
            "⏰ Reminder set: water the plants"
        );
        assert_eq!(
            Dispatcher::handle_reminder(None),
            "⏰ Reminder set: Remember this"
        );
    }

    #[test]
    fn test_handle_time_formats() {
        let result = Dispatcher::handle_time();
        let mut lines = result.lines();

        let time_line = lines.next().expect("time line");
        assert!(time_line.starts_with("🕐 "));
        assert!(time_line.ends_with("AM") || time_line.ends_with("PM"));
        assert!(time_line.contains(':'));

        let date_line = lines.next().expect("date line");
        assert!(date_line.starts_with("📅 "));
        // e.g. "📅 Thursday, August 07, 2026"
        assert_eq!(date_line.matches(", ").count(), 2);
    }

    #[test]
    fn test_unknown_message_text() {
        assert!(UNKNOWN_MESSAGE.starts_with("❓"));
        assert!(UNKNOWN_MESSAGE.contains("not recognized"));
    }
}
