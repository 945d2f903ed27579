use anyhow::Context;
use blog_server::config::AppConfig;
use blog_server::state::AppState;
use blog_server::{build_router, database, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load().context("Failed to load config")?;
    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let (host, port) = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    let app = build_router(AppState { db, config });
    axum::serve(listener, app).await?;

    Ok(())
}
