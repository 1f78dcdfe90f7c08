//! Voice pipeline: capture, playback, transcription, and synthesis

mod capture;
mod playback;
mod stt;
mod tts;

pub use capture::AudioCapture;
pub use playback::AudioPlayback;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
