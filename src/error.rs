//! Error types for the Chime gateway

use thiserror::Error;

/// Result type alias for Chime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Chime gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device or stream error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Chat completion provider error
    #[error("completion error: {0}")]
    Completion(String),

    /// Conversation invariant violation
    #[error("conversation error: {0}")]
    Conversation(String),

    /// Email provider error
    #[error("email error: {0}")]
    Email(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
