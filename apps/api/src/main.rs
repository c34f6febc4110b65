use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_api::cache::build_cache;
use career_api::config::Config;
use career_api::db::create_pool;
use career_api::insights::refresh::spawn_refresh_loop;
use career_api::llm_client::{self, LlmClient};
use career_api::routes::build_router;
use career_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize cache (connects to Redis lazily)
    let cache = build_cache(config.redis_url.as_deref())?;

    // Initialize LLM client, if configured
    let llm = LlmClient::from_key(config.anthropic_api_key.as_deref())?;
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => warn!("ANTHROPIC_API_KEY not set, AI endpoints will return 503"),
    }

    if let Some(llm) = &llm {
        spawn_refresh_loop(
            db.clone(),
            cache.clone(),
            llm.clone(),
            Duration::from_secs(config.insight_refresh_secs.max(60)),
        );
    }

    let state = AppState { db, cache, llm };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
