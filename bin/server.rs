// Merchant Resolver - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use merchant_resolver::api::{router, AppState};
use merchant_resolver::{init_tracing, load_merchants, Config};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // A registry that fails to load means the server does not start
    let registry = load_merchants(&config.merchants_dir)?;
    let app = router(AppState::new(registry));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Resolve: http://{}/v1/merchant/resolve?q=...", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
