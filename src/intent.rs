//! Intent classification
//!
//! Maps a free-text utterance to one of a fixed set of command intents by
//! ordered substring matching against a keyword table.

use std::fmt;

/// Category of a user utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Volume,
    Media,
    App,
    Search,
    About,
    Brightness,
    Lock,
    Screenshot,
    Reminder,
    Time,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Volume => "VOLUME",
            Intent::Media => "MEDIA",
            Intent::App => "APP",
            Intent::Search => "SEARCH",
            Intent::About => "ABOUT",
            Intent::Brightness => "BRIGHTNESS",
            Intent::Lock => "LOCK",
            Intent::Screenshot => "SCREENSHOT",
            Intent::Reminder => "REMINDER",
            Intent::Time => "TIME",
            Intent::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Keyword table driving classification.
///
/// Table order is binding: overlapping keywords ("who" is a Search trigger,
/// "who are you" an About trigger) resolve to the earliest row.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Volume,
        &["volume", "sound", "louder", "quieter", "mute", "unmute"],
    ),
    (
        Intent::Media,
        &["play", "pause", "stop", "next", "previous", "rewind", "forward"],
    ),
    (Intent::App, &["open", "launch", "start", "run"]),
    // Time outranks Search so "what time is it" resolves here rather than
    // through Search's bare "what" trigger.
    (
        Intent::Time,
        &["time", "what time", "current time", "date"],
    ),
    (
        Intent::Search,
        &[
            "tell me",
            "search",
            "google",
            "find",
            "look up",
            "tell me about",
            "who",
            "what",
            "when",
            "where",
            "why",
            "how",
            "explain",
        ],
    ),
    (
        Intent::About,
        &["who are you", "what can you do", "your name", "you"],
    ),
    (Intent::Brightness, &["brightness", "dim", "bright", "light"]),
    (Intent::Lock, &["lock", "logout", "sleep", "shutdown"]),
    (Intent::Screenshot, &["screenshot", "screen shot", "capture"]),
    (Intent::Reminder, &["remind", "reminder", "remember", "alert"]),
];

/// Classify an utterance into an intent.
///
/// Pure total function: every string maps to exactly one intent.
pub fn classify(utterance: &str) -> Intent {
    let text = utterance.to_lowercase();
    for (intent, keywords) in INTENT_KEYWORDS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *intent;
        }
    }
    Intent::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_volume() {
        assert_eq!(classify("volume up"), Intent::Volume);
        assert_eq!(classify("make it louder"), Intent::Volume);
        assert_eq!(classify("MUTE the sound"), Intent::Volume);
    }

    #[test]
    fn test_classify_app() {
        assert_eq!(classify("open notepad"), Intent::App);
        assert_eq!(classify("launch firefox"), Intent::App);
    }

    #[test]
    fn test_classify_media() {
        assert_eq!(classify("play despacito"), Intent::Media);
        assert_eq!(classify("pause"), Intent::Media);
    }

    #[test]
    fn test_classify_search() {
        assert_eq!(classify("what is rust"), Intent::Search);
        assert_eq!(classify("tell me about penguins"), Intent::Search);
    }

    #[test]
    fn test_classify_time_outranks_search() {
        assert_eq!(classify("what time is it"), Intent::Time);
        assert_eq!(classify("current time"), Intent::Time);
    }

    #[test]
    fn test_classify_table_order_on_overlap() {
        // "who" is a Search trigger and Search precedes About in the table.
        assert_eq!(classify("who are you"), Intent::Search);
        // About is reachable only without a Search keyword.
        assert_eq!(classify("your name"), Intent::About);
    }

    #[test]
    fn test_classify_remaining_intents() {
        assert_eq!(classify("brightness to max"), Intent::Brightness);
        // "lock the screen" hits Lock, not Screenshot: Lock precedes it.
        assert_eq!(classify("lock the screen"), Intent::Lock);
        assert_eq!(classify("take a screenshot"), Intent::Screenshot);
        assert_eq!(classify("remind me to stretch"), Intent::Reminder);
        assert_eq!(classify("time please"), Intent::Time);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("blorp zibble"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn test_classify_idempotent() {
        let utterance = "volume up a bit";
        assert_eq!(classify(utterance), classify(utterance));
    }
}
