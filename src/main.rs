use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platewise::config::Config;
use platewise::mealdb::MealDbClient;
use platewise::store::{DocumentStore, SqliteStore};
use platewise::AppState;

#[derive(Parser, Debug)]
#[command(name = "platewise")]
#[command(author, version, about = "A thin dietician & recipe builder backend", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "platewise.toml")]
    config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;

    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Platewise v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&config.store.data_dir)?;

    // A broken store degrades auth and search persistence but must not stop
    // the server; diet plans and recipe lookups still work without it.
    let store: Option<Arc<dyn DocumentStore>> = match SqliteStore::init(&config.store.data_dir)
        .await
    {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            tracing::warn!(error = %e, "Document store unavailable, continuing degraded");
            None
        }
    };

    let recipes = MealDbClient::new(
        config.recipes.base_url.clone(),
        Duration::from_secs(config.recipes.timeout_secs),
    )?;

    let state = Arc::new(AppState::new(config.clone(), store, recipes));
    let app = platewise::api::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
