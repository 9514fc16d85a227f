//! Telegram Bot API client
//!
//! Only `sendMessage` with plain text is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::provider::Notifier;
use crate::error::BotMessageError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    bot_token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(base_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            bot_token: bot_token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bot_token,
            method
        )
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), BotMessageError> {
        debug!("Sending message to chat {}", chat_id);

        let body = SendMessageRequest { chat_id, text };
        let resp = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                // reqwest puts the URL, and with it the bot token, into its errors
                let source = source.without_url();
                error!("Message delivery failed: {}", source);
                BotMessageError::Transport { source }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| {
            let source = source.without_url();
            error!("Failed to read chat API response: {}", source);
            BotMessageError::Transport { source }
        })?;

        // Only a parsed envelope with ok=true confirms delivery
        let envelope: Option<ApiEnvelope> = serde_json::from_str(&text).ok();
        let accepted = status.is_success() && envelope.as_ref().is_some_and(|e| e.ok);
        if !accepted {
            let description = envelope
                .and_then(|e| e.description)
                .unwrap_or(text);
            error!("Chat API rejected message: {} {}", status, description);
            return Err(BotMessageError::Rejected {
                status: status.as_u16(),
                description,
            });
        }

        debug!("Message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_deliver_posts_chat_id_and_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_body(Matcher::Json(json!({"chat_id": "42", "text": "привет"})))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{"message_id":1}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TelegramClient::new(format!("{}/", server.url()), "123:abc");
        client.deliver("42", "привет").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_rejected_with_description() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let client = TelegramClient::new(server.url(), "token");
        let err = client.deliver("1", "hi").await.unwrap_err();

        match err {
            BotMessageError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_false_envelope_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(200)
            .with_body(r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#)
            .create_async()
            .await;

        let client = TelegramClient::new(server.url(), "token");
        let err = client.deliver("1", "hi").await.unwrap_err();
        assert!(err.to_string().contains("blocked"));
    }

    #[tokio::test]
    async fn test_non_envelope_success_body_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(200)
            .with_body("<html>captive portal</html>")
            .create_async()
            .await;

        let client = TelegramClient::new(server.url(), "token");
        let err = client.deliver("1", "hi").await.unwrap_err();

        match err {
            BotMessageError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 200);
                assert!(description.contains("captive portal"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bottoken/sendMessage")
            .with_status(200)
            .create_async()
            .await;

        let client = TelegramClient::new(server.url(), "token");
        let err = client.deliver("1", "hi").await.unwrap_err();
        assert!(matches!(err, BotMessageError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = TelegramClient::new("http://127.0.0.1:1", "super-secret");
        let err = client.deliver("1", "hi").await.unwrap_err();

        assert!(matches!(err, BotMessageError::Transport { .. }));
        assert!(!err.to_string().contains("super-secret"));
    }
}
