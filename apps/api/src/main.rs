mod config;
mod editor;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::HtmlPrintHost;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn KeyValueStore> = if config.in_memory() {
        info!("Using in-memory storage; nothing survives a restart");
        Arc::new(MemoryStore::new())
    } else {
        let files = FileStore::new(&config.data_dir);
        info!("Storing CV data under {}", files.dir().display());
        Arc::new(files)
    };

    let host = Arc::new(HtmlPrintHost::new(config.export_dir.clone()));
    info!("Printable exports go to {}", config.export_dir.display());

    let state = AppState::new(config.clone(), store, host);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
