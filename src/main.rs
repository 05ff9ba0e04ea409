use ondemand_projects::config::AppConfig;
use ondemand_projects::handlers::{self, AppState};
use ondemand_projects::permissions::Getfacl;
use ondemand_projects::project::ProjectStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PROJECTS_DATAROOT etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "Starting project service in {:?} mode, dataroot {}",
        config.environment,
        config.storage.dataroot.display()
    );

    let state = AppState::new(ProjectStore::new(config.storage.clone()), Getfacl::detect());
    let app = handlers::router(state, &config.api);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
