//! JSON-RPC error catalogue
//!
//! Every failure detected while decoding or dispatching a call becomes an
//! [`ErrorObject`]. Built-in kinds come from a closed catalogue with fixed codes
//! and messages; handlers may additionally surface opaque application errors.

use std::fmt;

use axum::http::StatusCode;
use serde::{Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        Self::ParseError,
        Self::InvalidRequest,
        Self::MethodNotFound,
        Self::InvalidParams,
        Self::InternalError,
    ];

    pub const fn code(self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
        }
    }

    /// Transport status for a single-unit exchange that failed with this kind.
    ///
    /// Only `InvalidRequest` has a dedicated status; every other kind,
    /// `MethodNotFound` included, uses the server-error default.
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::ParseError | Self::MethodNotFound | Self::InvalidParams | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ErrorKind {}

/// Error defined by the application handler, passed through to the caller as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

/// The `error` member of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorObject {
    Builtin(ErrorKind),
    Application(ApplicationError),
}

impl ErrorObject {
    pub fn application(code: i64, message: impl Into<String>) -> Self {
        Self::Application(ApplicationError {
            code,
            message: message.into(),
            data: None,
        })
    }

    pub fn application_with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        Self::Application(ApplicationError {
            code,
            message: message.into(),
            data: Some(data),
        })
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Builtin(kind) => kind.code(),
            Self::Application(error) => error.code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Builtin(kind) => kind.message(),
            Self::Application(error) => &error.message,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Builtin(_) => None,
            Self::Application(error) => error.data.as_ref(),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Builtin(kind) => Some(*kind),
            Self::Application(_) => None,
        }
    }

    /// Application errors are opaque and always map to the default status.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Builtin(kind) => kind.status(),
            Self::Application(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorObject {
    fn from(kind: ErrorKind) -> Self {
        Self::Builtin(kind)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ErrorObject {}

#[derive(Serialize)]
struct WireError<'a> {
    code: i64,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

impl Serialize for ErrorObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireError {
            code: self.code(),
            message: self.message(),
            data: self.data(),
        }
        .serialize(serializer)
    }
}
