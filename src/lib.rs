//! Chime Gateway - voice assistant glue between ears, brain, and mouth
//!
//! Two cooperating roles built from one library:
//! - a capture & playback client that segments microphone audio into
//!   utterances, transcribes them, and speaks the replies
//! - a stateless orchestration service that runs chat-completion rounds,
//!   executing weather and email tools on the model's behalf
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              chime listen (client)                │
//! │  mic ─▶ segmenter ─▶ Whisper ─▶ POST ─▶ TTS ─▶ 🔊 │
//! └───────────────────────┬──────────────────────────┘
//!                         │ /generate_response
//! ┌───────────────────────▼──────────────────────────┐
//! │              chime serve (service)                │
//! │  completion ─▶ tools (weather, email) ─▶ reply    │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod orchestrator;
pub mod providers;
pub mod segmenter;
pub mod tools;
pub mod voice;

pub use client::VoiceClient;
pub use config::Config;
pub use conversation::{Conversation, Role, Turn};
pub use error::{Error, Result};
pub use orchestrator::Orchestrator;
pub use providers::{
    CompletionOutcome, CompletionProvider, EmailProvider, EmailReceipt, WeatherProvider,
    WeatherReport,
};
pub use segmenter::{
    EnergyClassifier, Segmenter, SegmenterConfig, SegmenterState, SpeechClassifier, VoiceSegment,
    FRAME_DURATION_MS, FRAME_SAMPLES, SAMPLE_RATE,
};
pub use tools::{builtin_tools, ToolDefinition, ToolInvocation};
