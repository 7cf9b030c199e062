//! Application launching and URL opening
//!
//! Resolves spoken application names to executables and spawns them as
//! detached processes. URLs go through `xdg-open` so the desktop default
//! browser handles them.

use crate::error::{VesperError, VesperResult};
use std::collections::HashMap;
use std::process::{Command, Stdio};
use tracing::debug;

/// Built-in application table: spoken name -> executable
const APP_COMMANDS: &[(&str, &str)] = &[
    ("notepad", "gedit"),
    ("text editor", "gedit"),
    ("calculator", "gnome-calculator"),
    ("chrome", "google-chrome"),
    ("chromium", "chromium"),
    ("firefox", "firefox"),
    ("edge", "microsoft-edge"),
    ("files", "nautilus"),
    ("file manager", "nautilus"),
    ("terminal", "gnome-terminal"),
    ("code", "code"),
    ("vs code", "code"),
    ("settings", "gnome-control-center"),
    ("music player", "rhythmbox"),
];

/// Resolve a spoken app name to an executable.
///
/// User aliases from config take precedence over the built-in table;
/// unknown names fall back to the raw name itself.
pub fn resolve(name: &str, aliases: &HashMap<String, String>) -> String {
    let name = name.to_lowercase();
    let name = name.trim();

    if let Some(command) = aliases.get(name) {
        return command.clone();
    }

    APP_COMMANDS
        .iter()
        .find(|(spoken, _)| *spoken == name)
        .map(|(_, command)| command.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Spawn an executable as a detached fire-and-forget process.
pub fn launch(command: &str) -> VesperResult<()> {
    debug!("Spawning: {}", command);
    Command::new(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| VesperError::Spawn(e.to_string()))?;
    Ok(())
}

/// Open a URL with the desktop default handler.
pub fn open_url(url: &str) -> VesperResult<()> {
    debug!("Opening URL: {}", url);
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| VesperError::Spawn(format!("xdg-open: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_app() {
        let aliases = HashMap::new();
        assert_eq!(resolve("chrome", &aliases), "google-chrome");
        assert_eq!(resolve("notepad", &aliases), "gedit");
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let aliases = HashMap::new();
        assert_eq!(resolve("Chrome", &aliases), "google-chrome");
        assert_eq!(resolve("  FIREFOX ", &aliases), "firefox");
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_raw_name() {
        let aliases = HashMap::new();
        assert_eq!(resolve("krita", &aliases), "krita");
    }

    #[test]
    fn test_resolve_alias_overrides_builtin() {
        let aliases = HashMap::from([("chrome".to_string(), "chromium".to_string())]);
        assert_eq!(resolve("chrome", &aliases), "chromium");
    }
}
