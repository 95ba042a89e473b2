//! CIQUAL Explorer Server
//!
//! Answers product metadata and known-code queries against bundled
//! reference data held in memory.

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ciqual_explorer::config::{Args, Config};
use ciqual_explorer::data::{load_index, Dataset};
use ciqual_explorer::routes;
use ciqual_explorer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "ciqual_explorer=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_args(Args::parse());

    tracing::info!("Starting CIQUAL Explorer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.data.dir.display());

    // The service is useless without its reference data: fail fast.
    let dataset = Dataset::load(&config.data)?;
    let index = load_index(&config.data)?;
    tracing::info!(
        "Datasets ready: {} products, {} AgriBalyse entries, {} ingredients",
        dataset.product_count(),
        dataset.agribalyse_count(),
        dataset.ingredient_count()
    );

    let app = routes::router(AppState::new(dataset, index));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Explorer stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A signal that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl+C listener unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM listener unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    tracing::info!("{} received, draining open connections", signal);
}
