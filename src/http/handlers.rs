//! Axum HTTP handlers for the web server
//!
//! Wraps the JSON-RPC core: checks the request envelope, hands the body to the
//! pipeline on the blocking pool and maps its outcome onto an HTTP reply.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{headers::ContentType, typed_header::TypedHeaderRejection, TypedHeader};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::ErrorKind;
use crate::jsonrpc::{self, Id, Outcome};
use crate::logging::RpcSummary;
use crate::AppState;

const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn rpc_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    content_type: Result<TypedHeader<ContentType>, TypedHeaderRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let content_type = content_type.ok().map(|TypedHeader(content_type)| content_type);
    if state.strict_headers && !(is_json(content_type.as_ref()) && accepts_json(&headers)) {
        return error_reply(ErrorKind::InvalidRequest);
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "failed to read request body");
            return error_reply(ErrorKind::InternalError);
        }
    };

    let handler = Arc::clone(&state.handler);
    match tokio::task::spawn_blocking(move || jsonrpc::process(handler.as_ref(), &body)).await {
        Ok(outcome) => outcome.into_response(),
        Err(err) => {
            error!(error = %err, "rpc handler did not complete");
            error_reply(ErrorKind::InternalError)
        }
    }
}

/// Any verb other than POST on the RPC route.
pub async fn unsupported_method() -> Response {
    error_reply(ErrorKind::MethodNotFound)
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = self.status();
        let summary = RpcSummary::of(&self);
        let mut response = match self {
            Self::Empty => status.into_response(),
            Self::Single(response) => (status, Json(response)).into_response(),
            Self::Batch(responses) => (status, Json(responses)).into_response(),
        };
        response.extensions_mut().insert(summary);
        response
    }
}

fn error_reply(kind: ErrorKind) -> Response {
    Outcome::Single(jsonrpc::Response::error(Id::Null, kind)).into_response()
}

fn is_json(content_type: Option<&ContentType>) -> bool {
    content_type
        .is_some_and(|content_type| media_type(&content_type.to_string()) == JSON_MEDIA_TYPE)
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|candidate| media_type(candidate) == JSON_MEDIA_TYPE)
}

fn media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
