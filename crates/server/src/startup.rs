use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the database, apply migrations when enabled and make sure the
/// upload directory exists.
pub async fn prepare_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    common::env::ensure_upload_dir(&cfg.upload.dir).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrate up failed: {e}")))?;
        info!(event = "migrated", "database schema up to date");
    }

    Ok(ServerState::new(db, &cfg.upload))
}

/// Build the application router for a prepared state.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(build_cors(), state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Serve the app for an already loaded config until Ctrl+C. Logging and
/// `.env` are set up by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = prepare_state(&cfg).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, upload_dir = %cfg.upload.dir, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
