//! Chromatic quantum zones clock.

use chromatiq::{ChatClient, ClockConfig, EmotionPipeline, LogPresenter, Presenter};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "chromatiq")]
#[command(about = "Chromatic quantum zones clock: emotion → color → 4-qubit state → Red/Yellow/Green")]
#[command(version)]
struct Cli {
    /// JSON config file; keys override defaults, environment and flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emotion label fed to every tick
    #[arg(long)]
    emotion: Option<String>,

    /// Records file for the startup batch (JSON array of {"text": ...})
    #[arg(long)]
    records: Option<PathBuf>,

    /// Pause between ticks, in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Chat-completions base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Run a single tick and exit
    #[arg(long)]
    once: bool,

    /// Skip the startup batch over stored records
    #[arg(long)]
    skip_batch: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ClockConfig, chromatiq::ChromaError> {
        let mut config = ClockConfig::load(self.config.as_deref())?;

        if let Some(v) = &self.emotion {
            config.emotion = v.clone();
        }
        if let Some(v) = &self.records {
            config.records_path = v.clone();
        }
        if let Some(v) = self.interval_ms {
            config.tick_interval_ms = v;
        }
        if let Some(v) = &self.api_base {
            config.api_base = v.clone();
        }
        if let Some(v) = &self.model {
            config.model = v.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("cannot render config: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if config.api_key.is_none() {
        info!("no API key configured (set OPENAI_API_KEY); requests go out unauthenticated");
    }

    let client = match ChatClient::new(config.chat()) {
        Ok(client) => client,
        Err(e) => {
            error!("cannot build collaborator client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut pipeline = EmotionPipeline::new(Arc::new(client), &config);
    let mut presenter = LogPresenter::default();

    if !cli.skip_batch {
        let report = pipeline.process_records().await;
        for record in pipeline.state().stress_scores() {
            info!("record {}: stress {:.1}", record.index, record.score);
        }
        if let Some(condition) = report.condition {
            info!("batch reported: {}", condition);
        }
    }

    if cli.once {
        pipeline.tick().await;
        presenter.present(pipeline.state());
        return ExitCode::SUCCESS;
    }

    info!("clock running for {:?} every {:?}; Ctrl-C to stop", pipeline.emotion(), config.tick_interval());
    pipeline
        .run_until(&mut presenter, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    ExitCode::SUCCESS
}
