//! Vesper Error Types
//!
//! Centralized error handling for the collaborator modules. Handlers catch
//! these at the dispatch boundary and turn them into status strings.

use thiserror::Error;

/// Central error type for Vesper
#[derive(Error, Debug)]
pub enum VesperError {
    #[error("ASR engine error: {0}")]
    Asr(String),

    #[error("Audio capture error: {0}")]
    Audio(String),

    #[error("Volume control error: {0}")]
    Volume(String),

    #[error("Input simulation error: {0}")]
    Input(String),

    #[error("Process spawn error: {0}")]
    Spawn(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for Vesper operations
pub type VesperResult<T> = Result<T, VesperError>;
