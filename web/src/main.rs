use site_core::{ContentClient, UreqTransport};
use site_web::{router, AppState, Renderer, SiteConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SiteConfig::from_env().map_err(std::io::Error::other)?;
    let renderer = Renderer::new().map_err(std::io::Error::other)?;
    let transport = UreqTransport::new(config.api.timeout());
    let client = ContentClient::new(transport, config.api.clone());

    let listener = TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, base_url = config.api.base_url(), "site listening");
    axum::serve(listener, router(AppState::new(client, renderer))).await
}
