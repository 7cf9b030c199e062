//! Text Normalization
//!
//! Applies the configured correction map to recognized text before the wake
//! gate. Corrections fix frequent recognizer errors, in particular misheard
//! wake-word spellings.

use std::collections::HashMap;

/// Normalizes spoken text using manual corrections from config
pub struct TextNormalizer {
    corrections: HashMap<String, String>,
}

impl TextNormalizer {
    pub fn new(corrections: HashMap<String, String>) -> Self {
        Self { corrections }
    }

    /// Lower-case the text and apply each configured correction.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_lowercase();

        for (from, to) in &self.corrections {
            result = result.replace(&from.to_lowercase(), to);
        }

        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let normalizer = TextNormalizer::new(HashMap::new());
        assert_eq!(normalizer.normalize("HELLO WORLD"), "hello world");
        assert_eq!(normalizer.normalize("  padded  "), "padded");
    }

    #[test]
    fn test_normalize_corrections() {
        let mut corrections = HashMap::new();
        corrections.insert("vespa".to_string(), "vesper".to_string());
        let normalizer = TextNormalizer::new(corrections);
        assert_eq!(normalizer.normalize("Vespa volume up"), "vesper volume up");
    }
}
