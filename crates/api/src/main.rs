use anyhow::Context;

use siteerp_api::config::ApiConfig;
use siteerp_infra::SiteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    siteerp_observability::init();

    let config = ApiConfig::from_env();

    let store = if config.seed {
        SiteStore::seeded().context("failed to load demo seed")?
    } else {
        SiteStore::new()
    };

    let app = siteerp_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, seeded = config.seed, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
