//! naivigator CLI
//!
//! Serves the map web app, or plans a single trip from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use naivigator::{
    config::{Config, LoggingConfig},
    llm::LlmClient,
    planner::TripPlanner,
    web::{self, AppState},
    TripRequest,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// naivigator - points of interest from an LLM, pinned on a map
#[derive(Parser)]
#[command(name = "naivigator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Plan one trip and print the places as JSON
    Plan {
        /// City or area, e.g. "Paris, France"
        #[arg(long)]
        city: String,

        /// Kind of places, e.g. "museums"
        #[arg(long, default_value = "")]
        interest: String,

        /// Number of places to suggest
        #[arg(short = 'n', long, default_value = "5")]
        count: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Test LLM connection
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Serve { host, port } => cmd_serve(config, host, port).await,
        Commands::Plan {
            city,
            interest,
            count,
            pretty,
        } => cmd_plan(config, TripRequest::new(city, interest, count), pretty).await,
        Commands::Test => cmd_test(config).await,
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        model = %config.llm.model,
        concurrency = config.resolver.concurrency,
        "Starting naivigator"
    );

    let planner = TripPlanner::from_config(&config).context("Failed to build trip planner")?;
    web::serve(&config.server.address(), AppState::new(planner))
        .await
        .context("Web server failed")
}

async fn cmd_plan(config: Config, request: TripRequest, pretty: bool) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let planner = TripPlanner::from_config(&config).context("Failed to build trip planner")?;

    let start = Instant::now();
    let plan = planner.plan(&request).await.context("Planning failed")?;

    let output = if pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        plan.to_json()?
    };
    println!("{}", output);

    eprintln!("Resolved {} places in {:.2?}", plan.len(), start.elapsed());

    Ok(())
}

async fn cmd_test(config: Config) -> Result<()> {
    println!("Testing LLM connection...\n");

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        config.llm.api_key.chars().take(8).collect::<String>()
    );
    println!();

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = LlmClient::new(config.llm)?;

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful!");
        }
        Err(e) => {
            println!("Connection failed: {}", e);
        }
    }

    Ok(())
}
