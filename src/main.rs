use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chime_gateway::api::{self, ApiState};
use chime_gateway::config::ApiKeys;
use chime_gateway::providers::{OpenAiCompletion, OpenWeatherMap, ResendEmail};
use chime_gateway::voice::{AudioCapture, AudioPlayback, TextToSpeech};
use chime_gateway::{Config, EnergyClassifier, Orchestrator, VoiceClient};

/// Chime - voice assistant gateway
#[derive(Parser)]
#[command(name = "chime", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the orchestration service
    Serve {
        /// Port to listen on
        #[arg(long, env = "CHIME_PORT")]
        port: Option<u16>,
    },
    /// Run the voice client loop
    Listen {
        /// Orchestration service URL
        #[arg(long, env = "CHIME_SERVER_URL")]
        server_url: Option<String>,
    },
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,chime_gateway=info",
        1 => "info,chime_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env();

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(&config).await
        }
        Command::Listen { server_url } => {
            if let Some(url) = server_url {
                config.server_url = url;
            }
            listen(&config).await
        }
        Command::TestMic { duration } => test_mic(duration).await,
        Command::TestSpeaker => test_speaker().await,
        Command::TestTts { text } => test_tts(&config, &text).await,
    }
}

/// Run the orchestration service
async fn serve(config: &Config) -> anyhow::Result<()> {
    let openai_key = ApiKeys::require(config.api_keys.openai.as_ref(), "OPENAI_API_KEY")?;
    let weather_key = ApiKeys::require(
        config.api_keys.openweathermap.as_ref(),
        "OPENWEATHERMAP_API_KEY",
    )?;
    let resend_key = ApiKeys::require(config.api_keys.resend.as_ref(), "RESEND_API_KEY")?;

    let completion = Arc::new(OpenAiCompletion::new(openai_key)?);
    let weather = Arc::new(OpenWeatherMap::new(weather_key)?);
    let email = Arc::new(ResendEmail::new(resend_key, config.email_sender.clone())?);

    let state = Arc::new(ApiState {
        orchestrator: Orchestrator::new(completion, weather.clone(), email.clone()),
        weather,
        email,
        default_model: config.llm_model.clone(),
    });

    tracing::info!(model = %config.llm_model, "starting orchestration service");
    api::ApiServer::new(state, config.port).run().await?;
    Ok(())
}

/// Run the voice client loop
#[allow(clippy::future_not_send)]
async fn listen(config: &Config) -> anyhow::Result<()> {
    // cpal streams aren't Send, so the whole loop stays on this task
    let mut client = VoiceClient::new(config)?;
    client.run().await?;
    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;

    let sample_rate = capture.sample_rate();
    println!("Sample rate: {sample_rate} Hz");
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.take_buffer();
        let energy = EnergyClassifier::rms(&samples);
        let peak = samples.iter().map(|s| s.saturating_abs()).max().unwrap_or(0);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = ((energy / 600.0) * 50.0).min(50.0) as usize;
        let meter: String = "#".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!("[{:2}s] RMS: {energy:8.1} | Peak: {peak:6} | [{meter}]", i + 1);
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");

    Ok(())
}

/// Test speaker output with a sine wave
async fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let mut playback = AudioPlayback::new()?;

    // Generate 2 seconds of 440Hz sine wave at 24kHz sample rate
    let sample_rate = 24000_i32;
    let frequency = 440.0_f32;
    let duration_secs = 2.0_f32;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let num_samples = (sample_rate as f32 * duration_secs) as usize;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3 // 30% volume
        })
        .collect();

    println!("Playing {} samples at {} Hz...", samples.len(), sample_rate);

    playback.play(samples).await?;

    println!("\n---");
    println!("If you heard the tone, your speakers are working!");

    Ok(())
}

/// Test TTS output
async fn test_tts(config: &Config, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let openai_key = ApiKeys::require(config.api_keys.openai.as_ref(), "OPENAI_API_KEY")?;
    let tts = TextToSpeech::new(
        openai_key,
        config.voice.tts_model.clone(),
        config.voice.tts_voice.clone(),
        config.voice.tts_speed,
    )?;

    println!("Synthesizing speech...");
    let mp3_data = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    println!("Playing audio...");
    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data).await?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}
