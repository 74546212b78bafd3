use anyhow::Context;

use barbermatch_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    barbermatch_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let bind_addr = config.bind_addr;

    let app = barbermatch_api::app::build_app(config)
        .await
        .context("failed to initialise services")?;

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
