//! Capture & playback client: the record → transcribe → reply → speak loop

use crate::config::{ApiKeys, Config};
use crate::conversation::{Conversation, Turn};
use crate::segmenter::{EnergyClassifier, Segmenter, SegmenterConfig};
use crate::voice::{AudioCapture, AudioPlayback, SpeechToText, TextToSpeech};
use crate::{Error, Result};

/// Voice client owning the microphone, the speakers, and the dialogue history
///
/// One instance runs one assistant session. The conversation accumulates
/// across cycles and is bounded by the configured history window.
pub struct VoiceClient {
    capture: AudioCapture,
    playback: AudioPlayback,
    stt: SpeechToText,
    tts: TextToSpeech,
    http: reqwest::Client,
    server_url: String,
    model: String,
    conversation: Conversation,
    history_window: usize,
    segmenter_config: SegmenterConfig,
    vad_mode: u8,
}

/// Request body for the orchestration service
#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

impl VoiceClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if an audio device cannot be opened or the `OpenAI` key
    /// is missing. Both are fatal, not retried.
    pub fn new(config: &Config) -> Result<Self> {
        let openai_key = ApiKeys::require(config.api_keys.openai.as_ref(), "OPENAI_API_KEY")?;

        let capture = AudioCapture::new()?;
        let playback = AudioPlayback::new()?;
        let stt = SpeechToText::new(openai_key.clone(), config.voice.stt_model.clone())?;
        let tts = TextToSpeech::new(
            openai_key,
            config.voice.tts_model.clone(),
            config.voice.tts_voice.clone(),
            config.voice.tts_speed,
        )?;

        Ok(Self {
            capture,
            playback,
            stt,
            tts,
            http: reqwest::Client::new(),
            server_url: config.server_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            conversation: Conversation::new(),
            history_window: config.history_window,
            segmenter_config: config.segmenter.to_segmenter_config(),
            vad_mode: config.segmenter.vad_mode,
        })
    }

    /// Run the capture loop until the process is stopped
    ///
    /// Cycle errors are logged and the loop continues; only construction
    /// failures abort the session.
    ///
    /// # Errors
    ///
    /// Currently never returns; the signature leaves room for a shutdown
    /// signal.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(server = %self.server_url, "voice client ready");

        loop {
            if let Err(e) = self.run_cycle().await {
                tracing::error!(error = %e, "voice cycle failed");
            }
        }
    }

    /// One full round trip: record, transcribe, ask, speak
    async fn run_cycle(&mut self) -> Result<()> {
        tracing::info!("listening for speech");

        let mut segmenter = Segmenter::new(
            EnergyClassifier::for_mode(self.vad_mode),
            self.segmenter_config,
        );
        let segment = self.capture.record_utterance(&mut segmenter).await?;

        tracing::debug!(duration_ms = segment.duration_ms(), "utterance captured");

        let wav = segment.to_wav()?;
        let transcript = self.stt.transcribe(&wav).await?;

        // Nothing said: restart the cycle without contacting the service
        if transcript.trim().is_empty() {
            tracing::debug!("empty transcript, restarting");
            return Ok(());
        }

        tracing::info!(user = %transcript, "transcribed");
        self.conversation.push(Turn::user(transcript));

        let Some(reply) = self.request_reply().await? else {
            tracing::warn!("assistant response not found");
            return Ok(());
        };

        tracing::info!(assistant = %reply, "reply received");
        self.conversation.push(Turn::assistant(reply.clone()));
        self.conversation.trim_to(self.history_window);

        let audio = self.tts.synthesize(&reply).await?;
        self.playback.play_mp3(&audio).await?;

        Ok(())
    }

    /// POST the conversation to the orchestration service and extract the
    /// latest assistant turn from the extended conversation it returns
    async fn request_reply(&self) -> Result<Option<String>> {
        let request = GenerateRequest {
            model: &self.model,
            messages: self.conversation.turns(),
        };

        let response = self
            .http
            .post(format!("{}/generate_response", self.server_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Completion(format!(
                "orchestrator error {status}: {body}"
            )));
        }

        let extended: Vec<Turn> = response.json().await?;
        let reply = Conversation::from(extended)
            .last_assistant()
            .map(|turn| turn.content.clone());

        Ok(reply)
    }
}
