use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use trove_api::{
    api::{create_router, AppState},
    config::Config,
    store::{MemoryStore, PgStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = match &config.database_url {
        Some(url) => {
            tracing::info!("Using Postgres store");
            AppState::new(Arc::new(PgStore::connect(url).await?))
        }
        None => {
            tracing::info!("DATABASE_URL unset, using in-memory store");
            AppState::new(Arc::new(MemoryStore::new()))
        }
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "trove-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
