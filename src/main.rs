use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use cf_insight::api::state::AppState;
use cf_insight::config::AppConfig;
use cf_insight::fetch::{ClientConfig, CodeforcesClient, JudgeClient};
use cf_insight::transform::{aggregate_submissions, transform_rating_history};

#[derive(Parser)]
#[command(name = "cf-insight")]
#[command(about = "Codeforces profile analytics backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch one handle and print its aggregates as JSON
    Inspect {
        /// Codeforces handle
        handle: String,

        /// Which aggregates to print
        #[arg(long, value_enum, default_value = "all")]
        what: InspectTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InspectTarget {
    Rating,
    Status,
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting cf-insight v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("loading config from {}", cli.config))?
    } else {
        AppConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            let judge = Arc::new(build_client(&config)?);
            let state = AppState { judge };
            let app = cf_insight::api::build_router(state, &config.server.cors_origin);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Inspect { handle, what } => {
            let judge = build_client(&config)?;

            if matches!(what, InspectTarget::Rating | InspectTarget::All) {
                let contests = judge.user_rating(&handle).await?;
                let history = transform_rating_history(&contests)?;
                println!("{}", serde_json::to_string_pretty(&history)?);
            }

            if matches!(what, InspectTarget::Status | InspectTarget::All) {
                let submissions = judge.user_status(&handle).await?;
                let stats = aggregate_submissions(&submissions)?;
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
        }
    }

    Ok(())
}

/// Build the judge client from the application config.
fn build_client(config: &AppConfig) -> Result<CodeforcesClient> {
    let base_url = Url::parse(&config.judge.base_url)
        .with_context(|| format!("invalid judge base URL: {}", config.judge.base_url))?;

    let client = CodeforcesClient::new(ClientConfig {
        base_url,
        timeout: Duration::from_secs(config.judge.timeout_seconds),
        user_agent: config.judge.user_agent.clone(),
    })?;

    Ok(client)
}
