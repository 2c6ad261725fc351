use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::{ErrorKind, ErrorObject};
use crate::jsonrpc::Outcome;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// What an RPC exchange produced, carried as a response extension so the
/// request log can report it without re-reading the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcSummary {
    pub replies: usize,
    /// Built-in error of a single-unit exchange.
    pub rejection: Option<ErrorKind>,
}

impl RpcSummary {
    pub fn of(outcome: &Outcome) -> Self {
        let rejection = match outcome {
            Outcome::Single(response) => response.error_object().and_then(ErrorObject::kind),
            Outcome::Empty | Outcome::Batch(_) => None,
        };
        Self {
            replies: outcome.responses().len(),
            rejection,
        }
    }
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let content_length = request
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();
    let summary = response.extensions().get::<RpcSummary>().copied();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        content_length,
        rpc_replies = summary.map(|summary| summary.replies),
        duration_ms = elapsed_ms,
        "request summary"
    );

    match summary.and_then(|summary| summary.rejection) {
        Some(kind) => warn!(
            path = %path,
            status = status.as_u16(),
            rpc_code = kind.code(),
            rpc_error = %kind,
            "rpc call rejected"
        ),
        None if status.is_client_error() => {
            warn!(method = %method, path = %path, status = status.as_u16(), "route rejected")
        }
        None => {}
    }

    response
}
