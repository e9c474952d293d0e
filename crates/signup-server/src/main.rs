//! Member Signup Server - Entry point.

use signup_server::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Member Signup Server");

    // Initialize storage once for the life of the process
    let store = match config.storage.open_store().await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize member storage: {:#}", e);
            std::process::exit(1);
        }
    };

    match store.count().await {
        Ok(count) => info!("Member storage holds {} registrations", count),
        Err(e) => error!("Member storage is not answering: {}", e),
    }

    // Create application state
    let state = AppState::new(store);

    // Create rate limiter from config
    let rate_limit = RateLimitState::new(config.rate_limit.submissions_per_minute);

    // Create router with rate limiting
    let app = create_router_with_rate_limit(state, rate_limit);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
