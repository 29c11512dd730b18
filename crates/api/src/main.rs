use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    firstshot_observability::init();

    let config = firstshot_api::ApiConfig::from_env()?;
    let addr = config.addr;
    let app = firstshot_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
