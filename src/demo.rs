//! Small calculator handler served by the bundled binary.
//!
//! Methods prefixed with `notify_` are accepted and answered with no reply.

use serde_json::{json, Value};

use crate::errors::{ErrorKind, ErrorObject};
use crate::jsonrpc::{Call, HandlerResult, RpcHandler};
use crate::params;

#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl RpcHandler for Calculator {
    fn handle(&self, call: &Call) -> HandlerResult {
        if call.method.starts_with("notify_") {
            return Ok(None);
        }

        match call.method.as_str() {
            "sum" => sum(call.params.as_ref()).map(Some),
            "subtract" => subtract(call.params.as_ref()).map(Some),
            "echo" => Ok(Some(call.params.clone().unwrap_or(Value::Null))),
            "get_data" => Ok(Some(json!(["hello", 5]))),
            _ => Err(ErrorKind::MethodNotFound.into()),
        }
    }
}

fn sum(params: Option<&Value>) -> Result<Value, ErrorObject> {
    let values = params::positional::<Value>(params).ok_or(ErrorKind::InvalidParams)?;
    let total = values
        .iter()
        .map(params::int)
        .try_fold(0_i64, |total, value| total.checked_add(value?))
        .ok_or(ErrorKind::InvalidParams)?;
    Ok(json!(total))
}

fn subtract(params: Option<&Value>) -> Result<Value, ErrorObject> {
    let (minuend, subtrahend) = match params::positional::<Value>(params) {
        Some(values) if values.len() == 2 => (params::int(&values[0]), params::int(&values[1])),
        Some(_) => return Err(ErrorKind::InvalidParams.into()),
        None => {
            let named = params::named::<Value>(params).ok_or(ErrorKind::InvalidParams)?;
            (
                named.get("minuend").and_then(params::int),
                named.get("subtrahend").and_then(params::int),
            )
        }
    };

    minuend
        .zip(subtrahend)
        .and_then(|(minuend, subtrahend)| minuend.checked_sub(subtrahend))
        .map(|difference| json!(difference))
        .ok_or_else(|| ErrorKind::InvalidParams.into())
}
