// Director RPC envelope codec
//
// Every call is a single `{action, method, type, tid, data}` object POSTed
// to the router; every answer comes back wrapped in
// `{action, method, tid, type, message?, where?, cause?, data?}`.
// `data` stays untyped here; the service facades convert it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{ApiError, Error};

/// The envelope `type` for every outbound call.
pub const RPC_TYPE: &str = "rpc";

/// Transaction id sent with every call. Requests are never batched, so a
/// constant is enough to correlate the single answer.
pub const DEFAULT_TID: u64 = 1;

// ── Request ──────────────────────────────────────────────────────────

/// Outbound envelope.
///
/// ```json
/// { "action": "AuthenticationManagement", "method": "login",
///   "type": "rpc", "tid": 1, "data": ["admin", "secret", true] }
/// ```
///
/// Only [`new`](RequestEnvelope::new) and
/// [`without_data`](RequestEnvelope::without_data) build one, so `type` is
/// always `"rpc"` and `tid` always [`DEFAULT_TID`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    action: String,
    method: String,
    #[serde(rename = "type")]
    kind: String,
    tid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<Value>>,
}

impl RequestEnvelope {
    /// Build an envelope with positional parameters.
    ///
    /// `params` is usually a tuple, which serializes to a JSON array and is
    /// used as the positional list as-is. Any other value becomes the single
    /// positional parameter.
    pub fn new(
        action: impl Into<String>,
        method: impl Into<String>,
        params: &impl Serialize,
    ) -> Result<Self, Error> {
        let data = match serde_json::to_value(params).map_err(Error::Encode)? {
            Value::Array(values) => values,
            other => vec![other],
        };
        Ok(Self {
            data: Some(data),
            ..Self::without_data(action, method)
        })
    }

    /// Build an envelope for a method that takes no parameters. `data` is
    /// left off the wire entirely.
    pub fn without_data(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            kind: RPC_TYPE.to_owned(),
            tid: DEFAULT_TID,
            data: None,
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Always `"rpc"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn tid(&self) -> u64 {
        self.tid
    }

    pub fn data(&self) -> Option<&[Value]> {
        self.data.as_deref()
    }

    /// Serialize to the wire format.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(Error::Encode)
    }
}

// ── Response ─────────────────────────────────────────────────────────

/// Inbound envelope, generic over the `data` payload.
///
/// Decoded first with `T = Value`, then narrowed with
/// [`into_typed`](ResponseEnvelope::into_typed). Every field tolerates being
/// absent because failure envelopes are frequently sparse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = Value> {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: String,
    /// Echo of the request tid. The director sends it as a string.
    #[serde(default, deserialize_with = "tid_as_string")]
    pub tid: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server-side location of the failure, if any.
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Why a response body could not be turned into an envelope.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Zero bytes (or only whitespace) came back.
    #[error("empty response body")]
    Empty,
    /// The body is not a JSON envelope.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ResponseEnvelope {
    /// Parse a raw body into an untyped envelope.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::Empty);
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Convert `data` into the domain shape a facade method declares.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<ResponseEnvelope<T>, serde_json::Error> {
        let data = self.data.map(serde_json::from_value).transpose()?;
        Ok(ResponseEnvelope {
            action: self.action,
            method: self.method,
            tid: self.tid,
            kind: self.kind,
            message: self.message,
            location: self.location,
            cause: self.cause,
            data,
        })
    }
}

impl<T> ResponseEnvelope<T> {
    /// The application error this envelope reports, if any.
    ///
    /// A failure needs both a non-empty `message` and a non-empty `cause`.
    /// A lone `message` is informational and the call still succeeds. The
    /// HTTP status plays no part in this decision.
    pub fn failure(&self) -> Option<ApiError> {
        let message = self.message.as_deref().filter(|m| !m.is_empty())?;
        let cause = self.cause.as_deref().filter(|c| !c.is_empty())?;
        Some(ApiError {
            message: message.to_owned(),
            location: self.location.clone().unwrap_or_default(),
            cause: cause.to_owned(),
        })
    }
}

fn tid_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tid {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Tid>::deserialize(deserializer)? {
        Some(Tid::Text(text)) => text,
        Some(Tid::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
