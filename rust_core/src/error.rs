//! Error taxonomy for the homework status bot
//!
//! Each stage of a polling cycle has its own closed error type so that a
//! failure carries structured context instead of a stringified cause:
//! - [`ApiAnswerError`] for the status endpoint (transport, bad status code, bad body)
//! - [`ResponseShapeError`] for a payload that does not match the documented shape
//! - [`ParseStatusError`] for a submission record that cannot be turned into a verdict
//! - [`BotMessageError`] for a failed chat delivery
//!
//! [`BotError`] is the union used as the error of one cycle, and
//! [`BotMainError`] is what ends the process.

use std::fmt;
use thiserror::Error;

/// Request details attached to status-endpoint failures for diagnostics.
///
/// The credential is never stored here; the authorization header is redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub endpoint: String,
    pub from_date: i64,
}

impl RequestContext {
    pub fn new(endpoint: impl Into<String>, from_date: i64) -> Self {
        Self {
            endpoint: endpoint.into(),
            from_date,
        }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "endpoint={} headers={{Authorization: OAuth <redacted>}} params={{from_date: {}}}",
            self.endpoint, self.from_date
        )
    }
}

/// Failure talking to the homework status endpoint
#[derive(Debug, Error)]
pub enum ApiAnswerError {
    /// Endpoint answered with something other than 200
    #[error("endpoint {endpoint} returned unexpected status code {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// Request never produced a response (timeout, connection refused, ...)
    #[error("request failed ({context}): {source}")]
    Transport {
        context: RequestContext,
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be decoded as JSON
    #[error("response body is not valid JSON ({context}): {source}")]
    MalformedBody {
        context: RequestContext,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiAnswerError {
    /// HTTP status code, when the endpoint answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiAnswerError::UnexpectedStatus { status, .. } => Some(*status),
            ApiAnswerError::Transport { source, .. } | ApiAnswerError::MalformedBody { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
        }
    }
}

/// Payload from the status endpoint does not have the documented shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    #[error("API data arrived as a list")]
    ArrivedAsList,

    #[error("API data is not an object (got {found})")]
    NotAnObject { found: &'static str },

    #[error("API data has no \"homeworks\" field")]
    MissingHomeworks,

    #[error("\"homeworks\" is not a list (got {found})")]
    HomeworksNotAList { found: &'static str },

    #[error("API data has no integer \"current_date\" field")]
    MissingCurrentDate,
}

/// Submission record cannot be turned into a verdict message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseStatusError {
    #[error("homework record is not an object (got {found})")]
    NotAnObject { found: &'static str },

    #[error("homework record has no \"homework_name\" key")]
    MissingHomeworkName,

    #[error("homework record has no \"status\" key")]
    MissingStatus,

    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),
}

/// Chat delivery failed
#[derive(Debug, Error)]
pub enum BotMessageError {
    #[error("message delivery request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("message rejected by chat API (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Any failure inside one polling cycle
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Api(#[from] ApiAnswerError),

    #[error(transparent)]
    Shape(#[from] ResponseShapeError),

    #[error(transparent)]
    ParseStatus(#[from] ParseStatusError),

    #[error(transparent)]
    Message(#[from] BotMessageError),
}

/// Fatal error that stops the poller; `message` is the text that was
/// reported to the chat.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BotMainError {
    pub message: String,
    #[source]
    pub source: BotError,
}

/// Short JSON type name used in shape error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}
