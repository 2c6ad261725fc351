//! Decodes a single payload unit into a [`Call`] and runs it through the handler.

use serde::Deserialize;
use serde_json::{error::Category, Value};
use tracing::{debug, info};

use super::probe::identify;
use super::schema::{Call, Id, Response};
use super::{HandlerResult, RpcHandler};
use crate::errors::ErrorKind;

#[derive(Deserialize)]
struct CallBody {
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

fn decode_call(payload: &[u8], id: Option<Id>) -> Result<Call, ErrorKind> {
    let body: CallBody = serde_json::from_slice(payload).map_err(|err| match err.classify() {
        Category::Data => ErrorKind::InvalidRequest,
        Category::Syntax | Category::Eof | Category::Io => ErrorKind::ParseError,
    })?;

    Ok(Call {
        method: body.method,
        params: body.params,
        id,
    })
}

/// Handles one payload unit. `None` means the unit produces no reply.
pub fn dispatch<H: RpcHandler + ?Sized>(handler: &H, payload: &[u8]) -> Option<Response> {
    let id = match identify(payload) {
        Ok(id) => id,
        Err(rejection) => {
            debug!(id = %rejection.id, kind = %rejection.kind, "rpc envelope rejected");
            return Some(rejection.into());
        }
    };
    let reply_id = id.clone().unwrap_or(Id::Null);

    let call = match decode_call(payload, id) {
        Ok(call) => call,
        Err(kind) => {
            debug!(id = %reply_id, kind = %kind, "rpc call rejected");
            return Some(Response::error(reply_id, kind));
        }
    };

    let outcome = handler.handle(&call);
    info!(
        method = %call.method,
        id = %reply_id,
        outcome = outcome_label(&outcome),
        "rpc call handled"
    );

    match outcome {
        Ok(Some(result)) => Some(Response::result(reply_id, result)),
        Ok(None) => None,
        Err(error) => Some(Response::error(reply_id, error)),
    }
}

fn outcome_label(outcome: &HandlerResult) -> &'static str {
    match outcome {
        Ok(Some(_)) => "success",
        Ok(None) => "suppressed",
        Err(_) => "failure",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorObject;

    fn echo(call: &Call) -> HandlerResult {
        if call.method.starts_with("notify_") {
            return Ok(None);
        }
        match call.method.as_str() {
            "echo" => Ok(Some(call.params.clone().unwrap_or(Value::Null))),
            "fail" => Err(ErrorObject::application_with_data(
                -32001,
                "backend unavailable",
                json!({"backend": "db"}),
            )),
            _ => Err(ErrorKind::MethodNotFound.into()),
        }
    }

    #[test]
    fn result_carries_call_id() {
        let response = dispatch(
            &echo,
            br#"{"jsonrpc":"2.0","method":"echo","params":[1,2.5],"id":"a"}"#,
        )
        .expect("reply expected");

        assert_eq!(response, Response::result(Id::from("a"), json!([1, 2.5])));
    }

    #[test]
    fn params_keep_integer_and_fraction_literals() {
        let response = dispatch(
            &echo,
            br#"{"jsonrpc":"2.0","method":"echo","params":[10,1.50],"id":1}"#,
        )
        .expect("reply expected");

        let encoded = serde_json::to_string(&response).expect("serialize response");
        assert_eq!(encoded, r#"{"jsonrpc":"2.0","result":[10,1.50],"id":1}"#);
    }

    #[test]
    fn numeric_method_is_invalid_request_with_recovered_id() {
        let response = dispatch(&echo, br#"{"jsonrpc":"2.0","method":1,"id":"x"}"#)
            .expect("reply expected");
        assert_eq!(response, Response::error(Id::from("x"), ErrorKind::InvalidRequest));
    }

    #[test]
    fn numeric_method_without_id_has_null_id() {
        let response = dispatch(&echo, br#"{"jsonrpc": "2.0", "method": 1, "params": "bar"}"#)
            .expect("reply expected");
        assert_eq!(response, Response::error(Id::Null, ErrorKind::InvalidRequest));
    }

    #[test]
    fn missing_method_is_invalid_request() {
        let response =
            dispatch(&echo, br#"{"jsonrpc":"2.0","id":3}"#).expect("reply expected");
        assert_eq!(response, Response::error(Id::from(3), ErrorKind::InvalidRequest));
    }

    #[test]
    fn suppressed_even_with_id() {
        assert_eq!(
            dispatch(&echo, br#"{"jsonrpc":"2.0","method":"notify_x","id":9}"#),
            None
        );
        assert_eq!(dispatch(&echo, br#"{"jsonrpc":"2.0","method":"notify_x"}"#), None);
    }

    #[test]
    fn handler_errors_pass_through() {
        let response = dispatch(&echo, br#"{"jsonrpc":"2.0","method":"fail","id":5}"#)
            .expect("reply expected");
        let encoded = serde_json::to_value(&response).expect("serialize response");
        assert_eq!(
            encoded,
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32001, "message": "backend unavailable", "data": {"backend": "db"}},
                "id": 5
            })
        );
    }

    #[test]
    fn unknown_method_reports_method_not_found() {
        let response = dispatch(&echo, br#"{"jsonrpc": "2.0", "method": "foobar", "id": "1"}"#)
            .expect("reply expected");
        assert_eq!(response, Response::error(Id::from("1"), ErrorKind::MethodNotFound));
    }

    #[test]
    fn handler_sees_absent_and_null_ids_apart() {
        let seen = std::sync::Mutex::new(Vec::new());
        let record = |call: &Call| -> HandlerResult {
            seen.lock().expect("lock").push(call.id.clone());
            Ok(Some(Value::Null))
        };

        dispatch(&record, br#"{"jsonrpc":"2.0","method":"m"}"#);
        dispatch(&record, br#"{"jsonrpc":"2.0","method":"m","id":null}"#);

        assert_eq!(*seen.lock().expect("lock"), vec![None, Some(Id::Null)]);
    }
}
