use std::process;

use subway_server::config::ServerConfig;
use subway_server::fare::FareTable;
use subway_server::loader;
use subway_server::router::PathLimits;
use subway_server::web::{AppState, ENDPOINTS, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad configuration");
            process::exit(1);
        }
    };

    // Load the network (fail fast if the file is bad)
    let report = match loader::load_file(
        &config.network_file,
        config.chain_policy,
        config.load_policy,
    ) {
        Ok(report) => report,
        Err(e) => {
            error!(path = %config.network_file.display(), error = %e, "failed to load network");
            process::exit(1);
        }
    };

    let state = AppState::new(report.network, FareTable::default(), PathLimits::default());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "subway planner listening");
    for (pattern, _, about) in ENDPOINTS {
        info!("GET {pattern:<38} - {about}");
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
        }
        info!("shutting down");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %e, "server error");
        process::exit(1);
    }
}
