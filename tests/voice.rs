//! Voice pipeline integration tests
//!
//! Tests segmentation and WAV encoding without requiring audio hardware

use std::io::Cursor;

use chime_gateway::{
    EnergyClassifier, Segmenter, SegmenterConfig, SegmenterState, FRAME_SAMPLES, SAMPLE_RATE,
};

mod common;

/// Generate one frame of a sine wave at the given amplitude
fn sine_frame(frequency: f32, amplitude: f32) -> Vec<i16> {
    (0..FRAME_SAMPLES)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let sample = amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin();
            (sample * 32767.0) as i16
        })
        .collect()
}

/// One frame of silence
fn silent_frame() -> Vec<i16> {
    vec![0; FRAME_SAMPLES]
}

fn segmenter() -> Segmenter<EnergyClassifier> {
    Segmenter::new(EnergyClassifier::for_mode(3), SegmenterConfig::default())
}

#[test]
fn test_silence_never_triggers() {
    let mut seg = segmenter();

    for _ in 0..500 {
        assert!(!seg.push_frame(&silent_frame()));
    }
    assert_eq!(seg.state(), SegmenterState::Idle);
}

#[test]
fn test_speech_triggers_and_silence_completes() {
    let mut seg = segmenter();
    let config = SegmenterConfig::default();

    // Enough loud frames to trigger
    for _ in 0..config.voice_trigger_frames {
        seg.push_frame(&sine_frame(440.0, 0.5));
    }
    assert_eq!(seg.state(), SegmenterState::Recording);

    // Trailing silence completes the segment on the last frame
    let mut completed = false;
    for _ in 0..config.silence_frames {
        completed = seg.push_frame(&silent_frame());
    }
    assert!(completed);
    assert_eq!(seg.state(), SegmenterState::Complete);

    let segment = seg.take_segment();
    assert_eq!(
        segment.len(),
        (config.voice_trigger_frames + config.silence_frames) * FRAME_SAMPLES
    );
}

#[test]
fn test_speech_resumes_after_short_pause() {
    let mut seg = segmenter();
    let config = SegmenterConfig::default();

    for _ in 0..config.voice_trigger_frames {
        seg.push_frame(&sine_frame(440.0, 0.5));
    }

    // A pause shorter than the silence threshold keeps recording
    for _ in 0..config.silence_frames - 1 {
        assert!(!seg.push_frame(&silent_frame()));
    }
    assert!(!seg.push_frame(&sine_frame(440.0, 0.5)));
    assert_eq!(seg.state(), SegmenterState::Recording);

    // A full pause now completes
    for _ in 0..config.silence_frames - 1 {
        assert!(!seg.push_frame(&silent_frame()));
    }
    assert!(seg.push_frame(&silent_frame()));
}

#[test]
fn test_segment_wav_header() {
    let mut seg = segmenter();
    let config = SegmenterConfig::default();

    for _ in 0..config.voice_trigger_frames {
        seg.push_frame(&sine_frame(440.0, 0.5));
    }
    for _ in 0..config.silence_frames {
        seg.push_frame(&silent_frame());
    }

    let wav_data = seg.take_segment().to_wav().unwrap();

    // Check WAV header magic
    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");
    assert!(wav_data.len() > 44); // WAV header is 44 bytes
}

#[test]
fn test_wav_roundtrip() {
    let mut seg = segmenter();
    let config = SegmenterConfig::default();

    let first_frame = sine_frame(440.0, 0.5);
    seg.push_frame(&first_frame);
    seg.push_frame(&sine_frame(440.0, 0.5));
    for _ in 0..config.silence_frames {
        seg.push_frame(&silent_frame());
    }

    let segment = seg.take_segment();
    let wav_data = segment.to_wav().unwrap();

    // Read WAV back
    let cursor = Cursor::new(wav_data);
    let mut reader = hound::WavReader::new(cursor).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), segment.len());

    // Pre-trigger flush: playback starts with the first captured frame
    assert_eq!(&read_samples[..FRAME_SAMPLES], first_frame.as_slice());
}

#[test]
fn test_energy_classifier_separates_speech_from_silence() {
    let classifier = EnergyClassifier::for_mode(3);

    assert!(!chime_gateway::SpeechClassifier::is_speech(
        &classifier,
        &silent_frame(),
        SAMPLE_RATE
    ));
    assert!(chime_gateway::SpeechClassifier::is_speech(
        &classifier,
        &sine_frame(440.0, 0.5),
        SAMPLE_RATE
    ));
}
