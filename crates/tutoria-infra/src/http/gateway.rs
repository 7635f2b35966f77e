//! HttpChatGateway -- concrete [`ChatGateway`] implementation over reqwest.
//!
//! Posts the request envelope as camelCase JSON to the backend's `/chat`
//! endpoint and normalizes every outcome into a typed [`GatewayError`].
//! No retries are performed here; failures propagate to the caller.
//!
//! An optional API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;

use tutoria_core::gateway::ChatGateway;
use tutoria_types::config::BackendConfig;
use tutoria_types::gateway::{BackendErrorBody, ChatReply, GatewayError, RequestEnvelope};

/// Reqwest-backed chat gateway.
///
/// The transport timeout comes from [`BackendConfig::timeout_secs`] and is
/// the only timeout this subsystem enforces; it surfaces as
/// [`GatewayError::Timeout`].
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpChatGateway {
    /// Create a new gateway from backend configuration.
    pub fn new(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Attach a bearer API key sent with every request.
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The full chat endpoint URL.
    fn url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

// HttpChatGateway intentionally does NOT derive Debug so the API key can
// never appear in Debug output.

impl ChatGateway for HttpChatGateway {
    async fn send(
        &self,
        envelope: &RequestEnvelope,
        cancel: &CancellationToken,
    ) -> Result<String, GatewayError> {
        let mut request = self.client.post(self.url()).json(envelope);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(GatewayError::Cancelled),
            result = request.send() => result.map_err(map_transport_error)?,
        };

        let status = response.status();
        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(GatewayError::Cancelled),
            result = response.text() => result.map_err(map_transport_error)?,
        };

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        parse_reply(&body)
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(err.to_string())
    }
}

/// Build a [`GatewayError::Status`], preferring the backend's displayable
/// message when the failure body parses.
fn status_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|b| b.display_message().map(str::to_string))
        .unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() {
                "no error detail provided".to_string()
            } else {
                text.to_string()
            }
        });

    GatewayError::Status { status, message }
}

/// Extract the assistant reply from a success body.
fn parse_reply(body: &str) -> Result<String, GatewayError> {
    let reply: ChatReply =
        serde_json::from_str(body).map_err(|e| GatewayError::Malformed(e.to_string()))?;

    if reply.answer.trim().is_empty() {
        return Err(GatewayError::EmptyReply);
    }

    Ok(reply.answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_gateway() -> HttpChatGateway {
        HttpChatGateway::new(&BackendConfig {
            base_url: "http://localhost:8787".to_string(),
            timeout_secs: 60,
        })
    }

    #[test]
    fn test_url_joins_chat_path() {
        let gateway = make_gateway();
        assert_eq!(gateway.url(), "http://localhost:8787/chat");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = make_gateway().with_base_url("http://example.test/api/".to_string());
        assert_eq!(gateway.url(), "http://example.test/api/chat");
    }

    #[test]
    fn test_parse_reply_success() {
        let answer = parse_reply(r#"{"answer":"A closure is..."}"#).unwrap();
        assert_eq!(answer, "A closure is...");
    }

    #[test]
    fn test_parse_reply_blank_answer_is_empty_reply() {
        let err = parse_reply(r#"{"answer":"   "}"#).unwrap_err();
        assert!(matches!(err, GatewayError::EmptyReply));
    }

    #[test]
    fn test_parse_reply_malformed_body() {
        let err = parse_reply("not json at all").unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn test_parse_reply_missing_answer_field() {
        let err = parse_reply(r#"{"result":"hi"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn test_status_error_uses_nested_backend_message() {
        let err = status_error(503, r#"{"error":{"message":"model overloaded"}}"#);
        match err {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_uses_flat_message() {
        let err = status_error(400, r#"{"message":"bad request"}"#);
        match err {
            GatewayError::Status { message, .. } => assert_eq!(message, "bad request"),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(500, "Internal Server Error");
        match err {
            GatewayError::Status { message, .. } => {
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_empty_body() {
        let err = status_error(502, "");
        match err {
            GatewayError::Status { message, .. } => {
                assert_eq!(message, "no error detail provided");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        // Points at an unroutable port; the cancelled token must win the
        // select before any transport error surfaces.
        let gateway = make_gateway().with_base_url("http://127.0.0.1:9".to_string());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let envelope = RequestEnvelope {
            system_prompt: String::new(),
            article_context: String::new(),
            chat_history: Vec::new(),
            user_message: "hello".to_string(),
        };

        let err = gateway.send(&envelope, &cancel).await.unwrap_err();
        assert!(matches!(err, GatewayError::Cancelled));
    }
}
