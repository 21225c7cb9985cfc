//! moodcomic binary.

use clap::Parser;
use moodcomic::{AppConfig, AppState, Cli, ComicPipeline, Commands, init_tracing, serve};
use moodcomic_error::{MoodcomicResult, ServerError, ServerErrorKind};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    if let Err(e) = run(cli).await {
        error!(error = %e, "moodcomic failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> MoodcomicResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let config = match bind {
                Some(bind) => config.with_bind(bind),
                None => config,
            };
            let pipeline = ComicPipeline::from_config(&config)?;
            info!(bind = %config.server().bind(), "Starting moodcomic server");
            serve(config.server().bind(), AppState::new(pipeline)).await?;
        }
        ref command @ Commands::Generate { .. } => {
            let pipeline = ComicPipeline::from_config(&config)?;
            if let Some(request) = command.generation_request() {
                let comic = pipeline.handle(request).await?;
                let output = serde_json::to_string_pretty(&comic)
                    .map_err(|e| ServerError::new(ServerErrorKind::Output(e.to_string())))?;
                println!("{}", output);
            }
        }
    }

    Ok(())
}
