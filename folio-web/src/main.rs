//! folio-web - personal portfolio site with visitor recommendations
//!
//! Serves the single-page portfolio UI and a small JSON API; visitor
//! recommendations are persisted in a remote document database.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use folio_web::config::{Cli, Config, StoreBackend};
use folio_web::store::{FirestoreStore, MemoryStore, RecommendationStore};
use folio_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting folio-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    let store: Arc<dyn RecommendationStore> = match &config.store {
        StoreBackend::Firestore(firestore) => Arc::new(FirestoreStore::new(firestore)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let state = AppState::new(store);
    let app = build_router(state);

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("folio-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
