use std::sync::Arc;

use jsonrpc2_http::{build_app, config::Config, demo::Calculator, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(Arc::new(Calculator), &config);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        strict_headers = config.strict_headers,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
