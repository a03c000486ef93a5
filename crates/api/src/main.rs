use anyhow::Context;

use teamhub_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    teamhub_observability::init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let app = teamhub_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
