use anyhow::Context;
use clap::Parser;
use mindmap::cli::{
    handle_analyze_command, handle_config_command, handle_import_command, handle_init_command,
    handle_stats_command, print_error, AnalyzeOptions, Cli, Commands,
};
use mindmap::database::Database;
use mindmap::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    if cli.verbose {
        mindmap::logging::init_logging_with_level("debug")?;
    } else {
        mindmap::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    if let Err(e) = run(cli.command, &config).await {
        print_error(&format!("{e:#}"));
        return Err(e);
    }
    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Init { force } => {
            let database = connect(config).await?;
            handle_init_command(&database, force).await?;
        }
        Commands::Import { file } => {
            let database = connect(config).await?;
            handle_import_command(&database, &file)
                .await
                .with_context(|| format!("Failed to import {}", file.display()))?;
        }
        Commands::Analyze {
            user_id,
            limit,
            days_back,
            top_n,
            threshold,
            input,
            persist,
            export,
        } => {
            let options = AnalyzeOptions {
                limit,
                days_back,
                top_n,
                threshold,
                input,
                persist,
                export,
            };
            handle_analyze_command(config, &user_id, options)
                .await
                .with_context(|| format!("Analysis of {user_id} failed"))?;
        }
        Commands::Stats { user } => {
            let database = connect(config).await?;
            handle_stats_command(&database, user.as_deref()).await?;
        }
        Commands::Config => handle_config_command(config)?,
    }
    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    Database::from_config(config)
        .await
        .context("Failed to connect to the database")
}
