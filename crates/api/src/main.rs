use std::net::SocketAddr;
use std::sync::Arc;

use survey_api::config::ServerConfig;
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_api::telemetry;
use survey_db::store::{PgResponseStore, ResponseStore};
use survey_db::DatabaseConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    telemetry::init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        frontend_dir = %config.frontend_dir.display(),
        "Loaded server configuration"
    );

    let db_config = DatabaseConfig::from_env()?;
    tracing::info!(
        mode = db_config.mode(),
        ssl = db_config.ssl,
        max_connections = db_config.max_connections,
        acquire_timeout_secs = db_config.acquire_timeout_secs,
        "Loaded database configuration"
    );

    // --- Database ---
    let pool = survey_db::create_pool(&db_config)?;
    let store = PgResponseStore::new(pool.clone());

    // Runs alongside the listener. An unreachable database degrades the
    // service but does not delay or stop it.
    let schema_store = store.clone();
    tokio::spawn(async move {
        match schema_store.ensure_schema().await {
            Ok(()) => tracing::info!("Responses table ready"),
            Err(err) => {
                tracing::error!(error = %err, "Could not ensure responses table, continuing")
            }
        }
    });

    // --- App state ---
    let state = AppState::new(Arc::new(store));
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped accepting connections, closing pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
