//! HSNDB Server - Main entry point

use anyhow::Result;
use hsndb_common::logging::{init_logging, LogConfig};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

use hsndb_server::{
    api,
    config::Config,
    db::{self, InMemoryProteinStore, PgProteinStore, ProteinStore},
    features::FeatureState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("hsndb-server")
        .filter_directives("hsndb_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting HSNDB Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store = open_store(&config).await?;
    info!(backend = store.backend(), "Data store ready");

    let state = FeatureState {
        store,
        search: config.search.clone(),
        site: config.site.clone(),
    };
    let app = api::create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Use the fixture dataset when one is configured, PostgreSQL otherwise
async fn open_store(config: &Config) -> Result<Arc<dyn ProteinStore>> {
    if let Some(path) = &config.database.fixture_path {
        let store = InMemoryProteinStore::from_json_file(path)?;
        return Ok(Arc::new(store));
    }

    let pool = db::create_pool(&config.database).await?;

    if config.database.run_migrations {
        db::run_migrations(&pool).await?;
    } else {
        info!("Skipping database migrations (DATABASE_RUN_MIGRATIONS is not set)");
    }

    Ok(Arc::new(PgProteinStore::new(pool)))
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
