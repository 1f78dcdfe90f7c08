//! Configuration for the Chime gateway
//!
//! Everything comes from the environment: provider keys use their canonical
//! variable names, Chime-specific settings use a `CHIME_` prefix and have
//! working defaults.

use crate::segmenter::SegmenterConfig;

/// Default port for the orchestration service
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API keys for external services
    pub api_keys: ApiKeys,

    /// Voice pipeline configuration
    pub voice: VoiceConfig,

    /// Speech segmentation configuration
    pub segmenter: SegmenterSettings,

    /// Chat completion model identifier
    pub llm_model: String,

    /// Orchestration service port (`CHIME_PORT`)
    pub port: u16,

    /// Orchestration service URL the voice client talks to (`CHIME_SERVER_URL`)
    pub server_url: String,

    /// From-address for outbound email (`CHIME_EMAIL_SENDER`)
    pub email_sender: String,

    /// Max turns of dialogue history the client keeps (`CHIME_HISTORY_WINDOW`)
    pub history_window: usize,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper STT, TTS, chat completions)
    pub openai: Option<String>,

    /// `OpenWeatherMap` API key (weather lookups)
    pub openweathermap: Option<String>,

    /// `Resend` API key (email dispatch)
    pub resend: Option<String>,
}

impl ApiKeys {
    /// Take a key by value, or a config error naming the variable
    ///
    /// # Errors
    ///
    /// Returns error if the key is unset
    pub fn require(key: Option<&String>, var: &str) -> crate::Result<String> {
        key.cloned()
            .ok_or_else(|| crate::Error::Config(format!("{var} must be set")))
    }
}

/// Voice pipeline configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT model (`CHIME_STT_MODEL`, e.g. "whisper-1")
    pub stt_model: String,

    /// TTS model (`CHIME_TTS_MODEL`, e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier (`CHIME_TTS_VOICE`)
    pub tts_voice: String,

    /// TTS speed multiplier (`CHIME_TTS_SPEED`, 0.25 to 4.0)
    pub tts_speed: f32,
}

/// Speech segmentation configuration
#[derive(Debug, Clone, Copy)]
pub struct SegmenterSettings {
    /// Classifier aggressiveness, 0-3 (`CHIME_VAD_MODE`)
    pub vad_mode: u8,

    /// Speech frames required to trigger recording (`CHIME_VOICE_FRAMES`)
    pub voice_trigger_frames: usize,

    /// Consecutive silent frames that end an utterance (`CHIME_SILENCE_FRAMES`)
    pub silence_frames: usize,
}

impl SegmenterSettings {
    /// Convert to the segmenter's own config type
    #[must_use]
    pub const fn to_segmenter_config(self) -> SegmenterConfig {
        SegmenterConfig {
            voice_trigger_frames: self.voice_trigger_frames,
            silence_frames: self.silence_frames,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        let api_keys = ApiKeys {
            openai: std::env::var("OPENAI_API_KEY").ok(),
            openweathermap: std::env::var("OPENWEATHERMAP_API_KEY").ok(),
            resend: std::env::var("RESEND_API_KEY").ok(),
        };

        let voice = VoiceConfig {
            stt_model: env_or("CHIME_STT_MODEL", "whisper-1"),
            tts_model: env_or("CHIME_TTS_MODEL", "tts-1"),
            tts_voice: env_or("CHIME_TTS_VOICE", "alloy"),
            tts_speed: env_parsed("CHIME_TTS_SPEED", 1.0),
        };

        let segmenter = SegmenterSettings {
            vad_mode: env_parsed("CHIME_VAD_MODE", 3),
            voice_trigger_frames: env_parsed("CHIME_VOICE_FRAMES", 2),
            silence_frames: env_parsed("CHIME_SILENCE_FRAMES", 50),
        };

        Self {
            api_keys,
            voice,
            segmenter,
            llm_model: env_or("CHIME_LLM_MODEL", "gpt-4o"),
            port: env_parsed("CHIME_PORT", DEFAULT_PORT),
            server_url: env_or(
                "CHIME_SERVER_URL",
                &format!("http://localhost:{DEFAULT_PORT}"),
            ),
            email_sender: env_or(
                "CHIME_EMAIL_SENDER",
                "Voice Assistant <assistant@chime.dev>",
            ),
            history_window: env_parsed("CHIME_HISTORY_WINDOW", 20),
        }
    }
}

/// Read a variable with a string default
fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

/// Read a variable parsed to `T`, falling back to the default on absence
/// or parse failure
fn env_parsed<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
