//! VoiceCart - voice-driven cart entry for point of sale

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use voicecart::catalog::{load_catalog, CatalogProduct};
use voicecart::config::Config;
use voicecart::report::TransactionReport;
use voicecart::VoiceService;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an already-transcribed utterance
    Parse {
        /// e.g. "2 coke and 1 piattos, 100 pesos"
        text: String,

        /// JSON catalog of {id, name, price} to match against
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Listen once with the configured recognizer, then parse
    Listen {
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Override the speech engine (wyoming, stdin, none)
        #[arg(long)]
        engine: Option<String>,

        /// Raw 16-bit mono PCM capture for the Wyoming engine
        #[arg(long)]
        audio: Option<PathBuf>,
    },

    /// Print the product alias table
    Aliases,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging (RUST_LOG wins, then --verbose, then config)
    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🛒 VoiceCart v{} starting...", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Parse { text, catalog } => {
            let service = VoiceService::from_config(&config);
            let catalog = read_catalog(catalog.as_ref())?;
            print_report(&service, &config, &text, catalog.as_deref())?;
        }
        Command::Listen {
            catalog,
            engine,
            audio,
        } => {
            if let Some(engine) = engine {
                config.speech_engine = engine;
            }
            if let Some(audio) = audio {
                config.capture_file = audio.to_string_lossy().to_string();
            }

            let catalog = read_catalog(catalog.as_ref())?;
            let service = Arc::new(VoiceService::from_config(&config));
            if !service.is_voice_supported() {
                bail!(
                    "voice input is not available (speech engine '{}')",
                    config.speech_engine
                );
            }

            // Ctrl-C ends the session instead of killing the process
            let stopper = service.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted");
                    stopper.stop_listening();
                }
            });

            if config.speech_engine == "stdin" {
                eprintln!("Type the transaction and press Enter:");
            }
            let text = service.start_listening().await?;
            print_report(&service, &config, &text, catalog.as_deref())?;
        }
        Command::Aliases => {
            let service = VoiceService::from_config(&config);
            for (alias, canonical) in service.parser().names().aliases() {
                println!("{:<20} {}", alias, canonical);
            }
        }
    }

    Ok(())
}

fn read_catalog(path: Option<&PathBuf>) -> Result<Option<Vec<CatalogProduct>>> {
    match path {
        Some(path) => Ok(Some(load_catalog(path)?)),
        None => Ok(None),
    }
}

fn print_report(
    service: &VoiceService,
    config: &Config,
    text: &str,
    catalog: Option<&[CatalogProduct]>,
) -> Result<()> {
    let report = TransactionReport::build(
        service,
        text,
        catalog,
        config.suggestion_limit,
        config.suggestion_cutoff,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
