use capstone_users::config::{Config, QueryMode};
use capstone_users::api;
use std::net::SocketAddr;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing; DEBUG raises the default level
    let level = if config.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if config.query_mode == QueryMode::Concatenated {
        warn!("QUERY_MODE=concatenated: the id parameter is spliced into SQL and is injectable");
    }
    if config.debug {
        warn!("DEBUG enabled: verbose diagnostics, do not expose this server");
    }

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let query_mode = config.query_mode;
    let database_path = config.database_path.clone();

    let app = api::create_router(api::AppState::new(config));

    // Bind to address
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Server listening on {} (database: {}, query mode: {})",
        addr,
        database_path,
        query_mode
    );

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
