//! Vesper - Voice command assistant for the Linux desktop
//!
//! Listens for a wake word, transcribes speech locally, and routes each
//! utterance through the classify/extract/dispatch pipeline.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vesper::config::Config;
use vesper::dispatch::Dispatcher;
use vesper::normalize::TextNormalizer;
use vesper::wake::WakeGate;
use vesper::{asr, audio, audit};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Audio input device index
    #[arg(short, long)]
    device: Option<usize>,

    /// Process a single typed utterance and exit (skips audio capture and
    /// the wake gate)
    #[arg(short, long)]
    command: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎙️ Vesper v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let normalizer = TextNormalizer::new(config.voice_corrections.clone());
    let wake_gate = WakeGate::new(&config.wake_words);
    let mut dispatcher = Dispatcher::new(&config);

    // One-shot mode for typed commands
    if let Some(text) = args.command {
        let result = dispatcher.run(&text).await;
        if let Err(e) = audit::log(&text, &result) {
            warn!("Could not write audit log: {}", e);
        }
        println!("{}", result);
        return Ok(());
    }

    // Initialize audio capture
    let mut audio_rx = audio::start_capture(args.device)?;
    info!("🎙️ Audio capture started");

    // Initialize ASR
    let mut asr = asr::VoskAsr::new(&config.vosk_model_path)?;

    info!(
        "✅ Vesper ready - say '{}' followed by your command",
        config.wake_words.first().map(String::as_str).unwrap_or("vesper")
    );
    info!("   Try: 'volume up', 'open firefox', 'what time is it', 'play despacito'");

    // Main loop: one command per wake-word utterance, strictly sequential
    while let Some(samples) = audio_rx.recv().await {
        let Some(text) = asr.process(&samples)? else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        let text = normalizer.normalize(&text);
        info!("📝 Heard: '{}'", text);

        if !wake_gate.matches(&text) {
            debug!("Wake word not detected");
            continue;
        }

        let result = dispatcher.run(&text).await;
        if let Err(e) = audit::log(&text, &result) {
            warn!("Could not write audit log: {}", e);
        }
    }

    Ok(())
}
