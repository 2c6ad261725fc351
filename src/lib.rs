use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod demo;
pub mod errors;
pub mod http;
pub mod jsonrpc;
pub mod logging;
pub mod params;

use config::Config;
use jsonrpc::RpcHandler;

pub const RPC_PATH: &str = "/rpc";

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn RpcHandler>,
    pub strict_headers: bool,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(handler: Arc<dyn RpcHandler>, config: &Config) -> Self {
        Self {
            handler,
            strict_headers: config.strict_headers,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(http::handlers::health))
        .route(
            RPC_PATH,
            post(http::handlers::rpc_endpoint).fallback(http::handlers::unsupported_method),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
