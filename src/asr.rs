//! ASR (Automatic Speech Recognition) module using Vosk

use crate::error::{VesperError, VesperResult};
use std::path::PathBuf;
use tracing::{debug, info};
use vosk::{Model, Recognizer};

const SAMPLE_RATE: f32 = 16000.0;

/// Vosk-based ASR engine
pub struct VoskAsr {
    recognizer: Recognizer,
}

impl VoskAsr {
    /// Create a new Vosk ASR instance.
    ///
    /// The configured model path is tried first, then standard install
    /// locations.
    pub fn new(configured_path: &str) -> VesperResult<Self> {
        let model_path = find_model_path(configured_path).ok_or_else(|| {
            VesperError::Asr(
                "Could not find Vosk model. Install vosk-model-small-en-us".to_string(),
            )
        })?;

        info!("Loading Vosk model from: {}", model_path.display());

        let model = Model::new(model_path.to_string_lossy().as_ref())
            .ok_or_else(|| VesperError::Asr("Failed to load Vosk model".to_string()))?;

        let recognizer = Recognizer::new(&model, SAMPLE_RATE)
            .ok_or_else(|| VesperError::Asr("Failed to create Vosk recognizer".to_string()))?;

        Ok(Self { recognizer })
    }

    /// Process audio samples and return recognized text (if final)
    pub fn process(&mut self, samples: &[i16]) -> VesperResult<Option<String>> {
        let state = self.recognizer.accept_waveform(samples);

        match state {
            vosk::DecodingState::Finalized => {
                let result = self.recognizer.final_result();
                if let Some(single) = result.single() {
                    if let Some(text) = extract_text(&single.text) {
                        return Ok(Some(text));
                    }
                }
            }
            vosk::DecodingState::Running => {
                debug!("Partial: {}", self.recognizer.partial_result().partial);
            }
            vosk::DecodingState::Failed => {
                debug!("Decoding failed for this chunk");
            }
        }

        Ok(None)
    }

    /// Reset the recognizer state
    pub fn reset(&mut self) {
        self.recognizer.reset();
    }
}

/// Find a Vosk model, preferring the configured path
fn find_model_path(configured: &str) -> Option<PathBuf> {
    let candidates: Vec<Option<PathBuf>> = vec![
        Some(PathBuf::from(configured)),
        dirs::data_dir().map(|d| d.join("vosk/model")),
        Some(PathBuf::from("/usr/share/vosk/model")),
        Some(PathBuf::from("/usr/share/vosk-model-small-en-us")),
        Some(PathBuf::from("/usr/local/share/vosk/model")),
        dirs::home_dir().map(|d| d.join(".vosk/model")),
        dirs::home_dir().map(|d| d.join("vosk-model-small-en-us")),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.exists())
}

/// Extract text from Vosk result, filtering empty results
fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
