use std::sync::Arc;

use configs::AppConfig;
use migration::MigratorTrait;
use service::storage::SeaOrmStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

/// Public entry: connect the store, apply migrations, serve until a shutdown signal.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let store = Arc::new(SeaOrmStore::new(db));
    let state = AppState::from_store(store.clone());
    let app = routes::build_router(state, &cfg.server.api_prefix, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, api_prefix = %cfg.server.api_prefix, "menu service listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    // the router and its state are gone once serve returns
    match Arc::try_unwrap(store) {
        Ok(store) => {
            store.db.close().await?;
            info!("server stopped, database pool closed");
        }
        Err(_) => warn!("server stopped, store still shared; pool closes on drop"),
    }
    Ok(())
}
