//! Identifier and protocol-version extraction
//!
//! Identifiers may be strings, numbers or null, while each candidate decoder is
//! strict about the shape it accepts. Candidates are tried in order and the first
//! one that decodes wins. When none does, the error of the last candidate decides
//! whether the payload was unparseable or just malformed.

use serde::{de::IgnoredAny, Deserialize, Deserializer};
use serde_json::Number;

use super::schema::{Id, Response, VERSION};
use crate::errors::ErrorKind;

/// Identifier and version tag recovered from a payload unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub id: Option<Id>,
    pub version: String,
}

/// A payload unit rejected before dispatch. Carries the best id available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub id: Id,
    pub kind: ErrorKind,
}

impl From<Rejection> for Response {
    fn from(rejection: Rejection) -> Self {
        Response::error(rejection.id, rejection.kind)
    }
}

#[derive(Deserialize)]
struct StringIdentified {
    #[serde(default, deserialize_with = "null_as_empty")]
    jsonrpc: String,
    #[serde(default, deserialize_with = "present")]
    id: Option<Option<String>>,
}

#[derive(Deserialize)]
struct NumberIdentified {
    #[serde(default, deserialize_with = "null_as_empty")]
    jsonrpc: String,
    id: Number,
}

// Distinguishes an explicit `null` from a missing member.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// A `null` version tag reads as a missing one, so the id is still recovered.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

type Candidate = fn(&[u8]) -> serde_json::Result<Envelope>;

const CANDIDATES: [Candidate; 2] = [string_identified, number_identified];

fn string_identified(payload: &[u8]) -> serde_json::Result<Envelope> {
    let decoded: StringIdentified = serde_json::from_slice(payload)?;
    Ok(Envelope {
        id: decoded.id.map(|id| id.map_or(Id::Null, Id::String)),
        version: decoded.jsonrpc,
    })
}

fn number_identified(payload: &[u8]) -> serde_json::Result<Envelope> {
    let decoded: NumberIdentified = serde_json::from_slice(payload)?;
    Ok(Envelope {
        id: Some(Id::Number(decoded.id)),
        version: decoded.jsonrpc,
    })
}

/// Recovers the envelope of a payload unit without validating it.
///
/// When no candidate matches, the payload is rejected as a parse error unless
/// it is well-formed JSON of the wrong shape.
pub fn probe(payload: &[u8]) -> Result<Envelope, ErrorKind> {
    if let Some(envelope) = CANDIDATES
        .into_iter()
        .find_map(|candidate| candidate(payload).ok())
    {
        return Ok(envelope);
    }

    // serde_json stops at the first error, which may be a type mismatch
    // sitting in front of a syntax error.
    match serde_json::from_slice::<IgnoredAny>(payload) {
        Ok(_) => Err(ErrorKind::InvalidRequest),
        Err(_) => Err(ErrorKind::ParseError),
    }
}

/// Recovers the call id and checks the protocol version tag.
///
/// `Ok(None)` means the unit carries no `id` member at all.
pub fn identify(payload: &[u8]) -> Result<Option<Id>, Rejection> {
    let envelope = probe(payload).map_err(|kind| Rejection { id: Id::Null, kind })?;
    if envelope.version != VERSION {
        return Err(Rejection {
            id: envelope.id.unwrap_or(Id::Null),
            kind: ErrorKind::InvalidRequest,
        });
    }
    Ok(envelope.id)
}
