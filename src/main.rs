use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use gongsu_calendar::api::{AppState, create_router};
use gongsu_calendar::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let loader = ConfigLoader::from_env()?;
    let config = loader.config();
    let state = AppState::open(config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind.as_str()).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
