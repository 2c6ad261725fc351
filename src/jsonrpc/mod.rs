//! JSON-RPC 2.0 server core
//!
//! Decodes raw payloads, recovers call ids even from malformed input, dispatches
//! calls to an [`RpcHandler`] and aggregates the replies. Transport concerns live
//! in [`crate::http`].

pub mod batch;
pub mod dispatch;
pub mod probe;
pub mod schema;

use serde_json::Value;

use crate::errors::ErrorObject;

pub use batch::{process, Outcome};
pub use schema::{Call, Id, Response, VERSION};

/// `Ok(None)` asks for the reply to be suppressed, even when the call has an id.
pub type HandlerResult = Result<Option<Value>, ErrorObject>;

pub trait RpcHandler: Send + Sync {
    fn handle(&self, call: &Call) -> HandlerResult;
}

impl<F> RpcHandler for F
where
    F: Fn(&Call) -> HandlerResult + Send + Sync,
{
    fn handle(&self, call: &Call) -> HandlerResult {
        self(call)
    }
}
