//! Single-vs-batch detection and response aggregation.

use axum::http::StatusCode;
use serde_json::value::RawValue;
use tracing::debug;

use super::dispatch::dispatch;
use super::schema::{Id, Response};
use super::RpcHandler;
use crate::errors::ErrorKind;

/// Everything a payload produced, ready to be written back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every unit suppressed its reply.
    Empty,
    Single(Response),
    Batch(Vec<Response>),
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Empty => StatusCode::NO_CONTENT,
            Self::Single(response) => response
                .error_object()
                .map_or(StatusCode::OK, |error| error.status()),
            Self::Batch(_) => StatusCode::OK,
        }
    }

    pub fn responses(&self) -> &[Response] {
        match self {
            Self::Empty => &[],
            Self::Single(response) => std::slice::from_ref(response),
            Self::Batch(responses) => responses,
        }
    }
}

/// Runs a raw request payload through the full pipeline.
pub fn process<H: RpcHandler + ?Sized>(handler: &H, payload: &[u8]) -> Outcome {
    let units: Vec<Box<RawValue>> = match serde_json::from_slice(payload) {
        Ok(units) => units,
        Err(_) => return dispatch(handler, payload).map_or(Outcome::Empty, Outcome::Single),
    };

    if units.is_empty() {
        debug!("empty batch rejected");
        return Outcome::Single(Response::error(Id::Null, ErrorKind::InvalidRequest));
    }

    let total = units.len();
    let responses: Vec<Response> = units
        .iter()
        .filter_map(|unit| dispatch(handler, unit.get().as_bytes()))
        .collect();
    debug!(units = total, replies = responses.len(), "batch processed");

    if responses.is_empty() {
        Outcome::Empty
    } else {
        Outcome::Batch(responses)
    }
}
