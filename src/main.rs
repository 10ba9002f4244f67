//! Roboportal
//! Automated news portal: feeds in, rewritten articles with affiliate links out
//!
//! Features:
//! - Built-in catalog of RSS/Atom sources per editorial category
//! - Local language model rewrite (Ollama, JSON mode)
//! - Affiliate search links and cover images per article
//! - Link-based deduplication against the article store
//! - Supabase REST or direct Postgres storage
//! - Randomized, paced cycles with graceful shutdown on SIGTERM

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roboportal::config::Config;
use roboportal::error::{ErrorTier, PipelineError};
use roboportal::feeds::{HttpFeedFetcher, SourceCatalog};
use roboportal::http_client::{build_client, HttpClientConfig};
use roboportal::image::PromptImageGenerator;
use roboportal::llm::{OllamaClient, TextCompletion};
use roboportal::pipeline::{ensure_model_available, ArticlePipeline};
use roboportal::scheduler::{CycleScheduler, StopHandle};
use roboportal::storage::create_store;

/// Roboportal - automated news portal pipeline
#[derive(Parser, Debug)]
#[command(name = "roboportal")]
#[command(author = "Roboportal Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Feed harvesting, AI rewriting and affiliate publishing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, default_value = "false", global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run cycles continuously until stopped
    Run,

    /// Run a single cycle and exit
    Once,

    /// List the source catalog
    Sources,

    /// Check that the model service is reachable
    Check,
}

/// Generates a new correlation ID for the session
fn generate_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Sets up structured logging with tracing
fn setup_logging(log_level: &str, json_output: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

/// Logs a failed startup step by tier; every startup failure ends the process
fn startup_failure(step: &str, e: PipelineError) -> anyhow::Error {
    match e.tier() {
        ErrorTier::Abort => error!(step, error = %e, "Fatal startup error, aborting"),
        tier => error!(step, error = %e, tier = ?tier, "Startup step failed"),
    }
    e.into()
}

/// Stops the scheduler on SIGTERM/SIGINT
async fn shutdown_signal(stop: StopHandle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, finishing current source and stopping...");
        }
        _ = terminate => {
            info!("Received SIGTERM, finishing current source and stopping...");
        }
    }

    stop.stop();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.json_logs);

    let correlation_id = generate_correlation_id();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        correlation_id = %correlation_id,
        "Starting Roboportal"
    );

    let catalog = SourceCatalog::builtin();

    if let Commands::Sources = cli.command {
        list_sources(&catalog);
        return Ok(());
    }

    let config = Config::load().map_err(|e| startup_failure("config", e))?;

    let http = build_client(&HttpClientConfig::from_config(&config))
        .map_err(|e| startup_failure("http client", e))?;
    let model = Arc::new(OllamaClient::new(
        http.clone(),
        &config.ollama_url,
        &config.ollama_model,
        std::time::Duration::from_secs(config.model_timeout_secs),
    ));

    if let Commands::Check = cli.command {
        ensure_model_available(model.as_ref())
            .await
            .map_err(|e| startup_failure("health check", e))?;
        info!(url = %config.ollama_url, model = %model.model(), "Model service reachable");
        return Ok(());
    }

    config.validate().map_err(|e| startup_failure("config", e))?;

    info!(
        ollama = %config.ollama_url,
        model = %config.ollama_model,
        store = %config.store_backend,
        sources = catalog.len(),
        "Configuration loaded"
    );

    ensure_model_available(model.as_ref())
        .await
        .map_err(|e| startup_failure("health check", e))?;

    let store = create_store(&config, http.clone())
        .await
        .map_err(|e| startup_failure("store", e))?;
    let pipeline = Arc::new(ArticlePipeline::new(
        &config,
        Arc::new(HttpFeedFetcher::new(http)),
        store,
        model,
        Box::new(PromptImageGenerator::from_config(&config)),
    ));
    let scheduler = CycleScheduler::from_config(&config, catalog, pipeline);

    tokio::spawn(shutdown_signal(scheduler.stop_handle()));

    match cli.command {
        Commands::Run => {
            let cycles = scheduler.run().await;
            info!(cycles, "Roboportal stopped");
        }
        Commands::Once => {
            let report = scheduler.run_cycle().await;
            info!(
                created = report.created,
                scanned = report.sources_scanned,
                skipped = report.sources_skipped,
                duplicates = report.duplicates,
                "Single cycle complete"
            );
            println!("Created {} articles", report.created);
        }
        Commands::Sources | Commands::Check => {}
    }

    Ok(())
}

fn list_sources(catalog: &SourceCatalog) {
    println!("\nSource Catalog");
    println!("==============\n");
    for category in catalog.categories() {
        println!("{}:", category);
        for source in catalog.sources(category) {
            println!("  - {}", source.url);
        }
    }
    println!("\nTotal: {} sources", catalog.len());
}
