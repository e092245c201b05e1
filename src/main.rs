//! textweave - Main Entry Point
//!
//! Resolves the initial text, runs it through the configured agent chain,
//! prints the final text to stdout and emits any requested artifacts.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use textweave::agent::AgentRegistry;
use textweave::config::{self, PipelineConfig};
use textweave::engine::PipelineEngine;
use textweave::error::RunError;
use textweave::input::resolve_input;
use textweave::logging::init_default_logging;
use textweave::output;
use textweave::speech::{ElevenLabsClient, ElevenLabsConfig, MicCapture};
use tracing::{error, info, warn};

/// Run text through a configurable chain of transformation agents
#[derive(Parser)]
#[command(name = "textweave")]
#[command(about = "Run text through a configurable chain of transformation agents")]
#[command(version)]
struct Cli {
    /// Input text; omit to record from the microphone instead
    text: Option<String>,

    /// Render the final text to an audio file
    #[arg(long)]
    speak: bool,

    /// Microphone capture window in seconds (must be > 0)
    #[arg(long, value_name = "SECS")]
    capture_secs: Option<f64>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "TEXTWEAVE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!("Starting textweave v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_pipeline(cli, config).await {
        error!("Run failed: {e}");
        process::exit(1);
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(PipelineConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations
            let default_paths = vec!["textweave.toml", "config/textweave.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(PipelineConfig::load_from_file(&path)?);
                }
            }

            error!(
                "No configuration file found. Please provide one with -c/--config or create textweave.toml"
            );
            process::exit(1);
        }
    }
}

async fn run_pipeline(cli: Cli, config: PipelineConfig) -> Result<(), RunError> {
    let capture_secs = cli.capture_secs.unwrap_or(config.input.capture_secs);
    let capture_window = config::capture_duration(capture_secs)?;

    let registry = AgentRegistry::from_config(&config)?;
    let agents = registry.load(&config.agents)?;
    info!(agents = agents.len(), "pipeline loaded");

    let speech = ElevenLabsClient::new(ElevenLabsConfig::from_config(&config));
    let capture = MicCapture::new();

    let initial_input = resolve_input(cli.text, &capture, &speech, capture_window).await?;

    let mut engine = PipelineEngine::new(agents);
    let result = match engine.run(&initial_input).await {
        Ok(result) => result,
        Err(failure) => {
            let completed = failure.history().len();
            if completed > 0 {
                warn!(
                    steps_completed = completed,
                    "run halted; partial history preserved"
                );
            }
            return Err(failure.into());
        }
    };

    println!("{}", result.final_text);

    let report = output::emit(
        &result,
        &config.agents,
        &speech,
        cli.speak,
        &config.pipeline.output_dir,
    )
    .await;

    if !report.failures.is_empty() {
        warn!(
            failures = report.failures.len(),
            "run completed with artifact failures"
        );
    }

    Ok(())
}
