//! Practicum homework status API client
//!
//! Single endpoint: `GET <endpoint>?from_date=<unix ts>` authorised with an
//! `OAuth` token. Answers with the submissions changed since `from_date` and
//! the server's `current_date`.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use super::provider::StatusSource;
use crate::error::{ApiAnswerError, RequestContext};
use crate::models::Cursor;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Homework status API client
#[derive(Debug, Clone)]
pub struct PracticumClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent("HomeworkBot/1.0")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: Cursor) -> Result<Value, ApiAnswerError> {
        let context = RequestContext::new(&self.endpoint, cursor.timestamp());
        debug!("Requesting homework statuses from_date={}", cursor);

        let response = self
            .http
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, self.authorization())
            .query(&[("from_date", cursor.timestamp())])
            .send()
            .await
            .map_err(|source| ApiAnswerError::Transport {
                context: context.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Endpoint {} unavailable: status {}", self.endpoint, status);
            return Err(ApiAnswerError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ApiAnswerError::MalformedBody { context, source })
    }
}
