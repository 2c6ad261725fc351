//! JSON-RPC 2.0 message shapes
//!
//! Calls arrive with an optional identifier; responses always carry one, falling
//! back to `null` when the call had none or it could not be recovered.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::errors::{ErrorKind, ErrorObject};

pub const VERSION: &str = "2.0";

/// Call identifier. Numbers keep the literal they were sent with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Id {
    Null,
    String(String),
    Number(Number),
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<Number> for Id {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A decoded call. `id: None` marks a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Id>,
}

impl Call {
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            id: None,
        }
    }

    pub fn with_id(id: impl Into<Id>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            id: Some(id.into()),
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Deserializes the whole `params` member, treating an absent one as `null`.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, ErrorObject> {
        let params = self.params.clone().unwrap_or(Value::Null);
        serde_json::from_value(params).map_err(|_| ErrorKind::InvalidParams.into())
    }
}

#[derive(Serialize)]
struct WireCall<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Id>,
}

impl Serialize for Call {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireCall {
            jsonrpc: VERSION,
            method: &self.method,
            params: self.params.as_ref(),
            id: self.id.as_ref(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Result(Value),
    Error(ErrorObject),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    #[serde(flatten)]
    payload: Payload,
    id: Id,
}

impl Response {
    pub fn result(id: Id, result: Value) -> Self {
        Self {
            jsonrpc: VERSION,
            payload: Payload::Result(result),
            id,
        }
    }

    pub fn error(id: Id, error: impl Into<ErrorObject>) -> Self {
        Self {
            jsonrpc: VERSION,
            payload: Payload::Error(error.into()),
            id,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn result_value(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Result(value) => Some(value),
            Payload::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.payload {
            Payload::Result(_) => None,
            Payload::Error(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn result_response_serializes_in_wire_order() {
        let response = Response::result(Id::from(1), json!(19));
        let encoded = serde_json::to_string(&response).expect("serialize response");
        assert_eq!(encoded, r#"{"jsonrpc":"2.0","result":19,"id":1}"#);
    }

    #[test]
    fn error_response_with_null_id() {
        let response = Response::error(Id::Null, ErrorKind::ParseError);
        let encoded = serde_json::to_string(&response).expect("serialize response");
        assert_eq!(
            encoded,
            r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error"},"id":null}"#
        );
    }

    #[test]
    fn null_result_is_still_a_result() {
        let response = Response::result(Id::from("a"), Value::Null);
        let encoded = serde_json::to_string(&response).expect("serialize response");
        assert_eq!(encoded, r#"{"jsonrpc":"2.0","result":null,"id":"a"}"#);
        assert!(response.error_object().is_none());
    }

    #[test]
    fn notification_omits_id_and_absent_params() {
        let call = Call::notification("notify_null", None);
        let encoded = serde_json::to_string(&call).expect("serialize call");
        assert_eq!(encoded, r#"{"jsonrpc":"2.0","method":"notify_null"}"#);
        assert!(call.is_notification());
    }

    #[test]
    fn call_with_id_serializes_params_and_id() {
        let call = Call::with_id("some-id", "sum", Some(json!([1, 2])));
        let encoded = serde_json::to_string(&call).expect("serialize call");
        assert_eq!(
            encoded,
            r#"{"jsonrpc":"2.0","method":"sum","params":[1,2],"id":"some-id"}"#
        );
    }

    #[test]
    fn params_as_reports_invalid_params() {
        let call = Call::with_id(1, "sum", Some(json!({"a": 1})));
        let error = call
            .params_as::<Vec<i64>>()
            .expect_err("object is not a list");
        assert_eq!(error, ErrorObject::from(ErrorKind::InvalidParams));

        let call = Call::with_id(1, "sum", Some(json!([1, 2, 4])));
        assert_eq!(call.params_as::<Vec<i64>>(), Ok(vec![1, 2, 4]));
    }

    #[test]
    fn id_display() {
        assert_eq!(Id::Null.to_string(), "null");
        assert_eq!(Id::from("x").to_string(), "\"x\"");
        assert_eq!(Id::from(7).to_string(), "7");
    }
}
