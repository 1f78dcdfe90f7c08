//! Audio capture from microphone

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};

use crate::segmenter::{
    Segmenter, SegmenterState, SpeechClassifier, VoiceSegment, FRAME_SAMPLES, SAMPLE_RATE,
};
use crate::{Error, Result};

/// Captures audio from the default input device
///
/// Samples are converted to mono 16-bit PCM at 16kHz in the stream
/// callback, the format the segmenter and STT APIs consume.
pub struct AudioCapture {
    #[allow(dead_code)]
    device: Device,
    config: StreamConfig,
    buffer: Arc<Mutex<Vec<i16>>>,
    stream: Option<Stream>,
}

impl AudioCapture {
    /// Create a new audio capture instance
    ///
    /// # Errors
    ///
    /// Returns error if the audio device cannot be opened; this is fatal to
    /// the recording attempt and is never silently retried.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;

        let supported_config = device
            .supported_input_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && c.min_sample_rate() <= SampleRate(SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(SAMPLE_RATE)
            })
            .ok_or_else(|| Error::Audio("no suitable audio config found".to_string()))?;

        let config = supported_config
            .with_sample_rate(SampleRate(SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            channels = config.channels,
            "audio capture initialized"
        );

        Ok(Self {
            device,
            config,
            buffer: Arc::new(Mutex::new(Vec::new())),
            stream: None,
        })
    }

    /// Start the input stream
    ///
    /// # Errors
    ///
    /// Returns error if the stream cannot be built or started
    pub fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let buffer = Arc::clone(&self.buffer);
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device".to_string()))?;

        let config = self.config.clone();

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = buffer.lock() {
                        buf.extend(data.iter().map(|&sample| {
                            #[allow(clippy::cast_possible_truncation)]
                            let pcm = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                            pcm
                        }));
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio capture error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;
        self.stream = Some(stream);

        tracing::debug!("audio capture started");
        Ok(())
    }

    /// Stop the input stream, releasing the device
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            tracing::debug!("audio capture stopped");
        }
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    /// Get captured samples and clear the buffer
    #[must_use]
    pub fn take_buffer(&self) -> Vec<i16> {
        self.buffer
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default()
    }

    /// Get captured samples without clearing
    #[must_use]
    pub fn peek_buffer(&self) -> Vec<i16> {
        self.buffer
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default()
    }

    /// The capture sample rate
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    /// Record exactly one utterance
    ///
    /// Acquires the input stream, feeds whole frames to the segmenter until
    /// it completes, and releases the stream before returning. The stream is
    /// never held across transcription or playback. Blocks indefinitely if
    /// no speech ever arrives; the caller is expected to always be
    /// listening.
    ///
    /// # Errors
    ///
    /// Returns error if the device cannot be acquired
    pub async fn record_utterance<C: SpeechClassifier>(
        &mut self,
        segmenter: &mut Segmenter<C>,
    ) -> Result<VoiceSegment> {
        self.start()?;
        self.pump_frames(segmenter).await;
        self.stop();
        Ok(segmenter.take_segment())
    }

    /// Drain buffered samples into the segmenter until it completes
    async fn pump_frames<C: SpeechClassifier>(
        &self,
        segmenter: &mut Segmenter<C>,
    ) {
        // Carry-over for samples that don't fill a whole frame yet
        let mut pending: Vec<i16> = Vec::with_capacity(FRAME_SAMPLES * 2);

        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            pending.extend(self.take_buffer());

            let mut offset = 0;
            while offset + FRAME_SAMPLES <= pending.len() {
                let frame = &pending[offset..offset + FRAME_SAMPLES];
                offset += FRAME_SAMPLES;

                if segmenter.push_frame(frame) {
                    debug_assert_eq!(segmenter.state(), SegmenterState::Complete);
                    return;
                }
            }
            pending.drain(..offset);
        }
    }
}
