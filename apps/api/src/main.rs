mod config;
mod db;
mod errors;
mod evaluation;
mod extract;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::CompletionClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;
use crate::store::{ApplicationStore, JobCorpus};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = CompletionClient::new(&config)?;
    if llm.is_configured() {
        info!(
            "Completion client initialized (model: {}, max concurrent: {})",
            llm.model(),
            config.max_concurrent_completions
        );
    } else {
        warn!("COMPLETION_API_KEY not set; evaluations will return mock results");
    }

    // Initialize store
    let jobs: Arc<dyn JobCorpus>;
    let applications: Arc<dyn ApplicationStore>;
    match &config.database_url {
        Some(url) => {
            let store = Arc::new(PgStore::new(create_pool(url).await?));
            jobs = store.clone();
            applications = store;
        }
        None => {
            warn!("DATABASE_URL not set; using an empty in-memory store");
            let store = Arc::new(MemoryStore::default());
            jobs = store.clone();
            applications = store;
        }
    }

    let state = AppState {
        llm: Arc::new(llm),
        jobs,
        applications,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
