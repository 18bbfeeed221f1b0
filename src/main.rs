use anyhow::{Context, Result};
use channel::api::{create_config_router, ConfigAppState};
use channel::config::{load_config, ChannelConfig, StorageBackend};
use channel::pagination::Paginator;
use channel_connector::{ConfigManager, MemoryConfigManager, Registry, SqliteConfigManager};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "channel=info,channel_connector=info,tower_http=info".into()),
        )
        .init();

    info!("Channel admin starting...");

    // Read configuration (file is optional, env overrides win)
    let mut config = match std::env::var("CHANNEL_CONFIG") {
        Ok(path) => load_config(&path)?,
        Err(_) => ChannelConfig::default(),
    };
    config.apply_env();

    info!(
        bind_addr = %config.server.bind_addr,
        backend = ?config.storage.backend,
        database = %config.storage.database_path,
        pagination = config.pagination.enabled,
        flash = config.flash.enabled,
        "Configuration loaded"
    );

    let manager: Arc<dyn ConfigManager> = match config.storage.backend {
        StorageBackend::Sqlite => Arc::new(
            SqliteConfigManager::new(&config.storage.database_path)
                .context("Failed to initialize config store")?,
        ),
        StorageBackend::Memory => {
            warn!("Using in-memory config storage; configs are lost on restart");
            Arc::new(MemoryConfigManager::new())
        }
    };

    let registry = Registry::with_builtin_adapters(&config.adapters.disabled)
        .context("Failed to build adapter registry")?;
    info!(
        adapters = registry.get_adapters().len(),
        disabled = ?config.adapters.disabled,
        "Adapter registry initialized"
    );

    let state = ConfigAppState {
        manager,
        registry: Arc::new(registry),
        paginator: config
            .pagination
            .enabled
            .then(|| Paginator::new(config.pagination.per_page)),
        flash_enabled: config.flash.enabled,
    };

    let app = create_config_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "Channel admin listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Channel admin server error")?;

    info!("Channel admin stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl_c signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
