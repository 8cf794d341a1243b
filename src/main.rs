use expense_engine::api::{AppState, create_router};
use expense_engine::config::{ConfigLoader, DEFAULT_LOG_FILTER};
use expense_engine::store::MemoryStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let loaded = ConfigLoader::discover();

    let log_filter = loaded
        .as_ref()
        .map(|loader| loader.config().log_filter.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();

    let config = match loaded {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let state = AppState::from_config(&config, MemoryStore::new());
    let app = create_router(state);

    let address = config.server.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %address, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(address = %address, "expense engine listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
