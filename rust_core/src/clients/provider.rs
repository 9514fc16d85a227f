//! Client Traits
//!
//! The poller only talks to the outside world through these two seams:
//! one status source and one notifier. HTTP implementations live in
//! [`super::practicum`] and [`super::telegram`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ApiAnswerError, BotMessageError};
use crate::models::Cursor;

/// Source of homework status payloads
///
/// Implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the raw status payload for everything changed since `cursor`.
    ///
    /// Performs exactly one request; no retries.
    async fn fetch(&self, cursor: Cursor) -> Result<Value, ApiAnswerError>;
}

/// Delivers a text message to a chat
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), BotMessageError>;
}
