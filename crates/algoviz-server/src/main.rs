//! Binary entrypoint for the algoviz HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`ServerConfig`](algoviz_server::config::ServerConfig).

use std::process::ExitCode;

use algoviz_server::config::ServerConfig;
use algoviz_server::router::build_router;
use algoviz_server::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let app = build_router(AppState::new(config.limits));
    let addr = config.addr();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", addr, err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(limits = ?config.limits, "algoviz server starting on {}", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
