//! Wake-word gate
//!
//! An utterance is only considered a command when one of the configured
//! wake-word spellings occurs somewhere in it. The full utterance, wake word
//! included, flows on to classification.

/// Substring gate over a fixed set of wake-word spellings
pub struct WakeGate {
    spellings: Vec<String>,
}

impl WakeGate {
    pub fn new(spellings: &[String]) -> Self {
        Self {
            spellings: spellings.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// True when any spelling occurs in the utterance (case-insensitive).
    pub fn matches(&self, utterance: &str) -> bool {
        let text = utterance.to_lowercase();
        self.spellings.iter().any(|w| text.contains(w))
    }
}
