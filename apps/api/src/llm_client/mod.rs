//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to the model provider
//! directly. Handlers depend on the `ChatGateway` trait, so the provider can
//! be swapped (or stubbed out in tests) without touching endpoint code.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider answered with a non-2xx status. The status is kept as a
    /// bare u16 so it can cross from reqwest's http types into axum's.
    #[error("completion endpoint returned status {status}")]
    Upstream { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("completion endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The provider answered 2xx but the body is not JSON.
    #[error("completion endpoint returned a non-JSON body")]
    InvalidEnvelope { raw: String },
}

/// A chat-completion gateway: one prompt in, one raw response envelope out.
///
/// The envelope is returned untyped. Providers disagree on its shape, and
/// downstream extraction inspects whatever came back rather than losing it
/// to a strict deserialize.
///
/// No retries, no timeout beyond transport defaults: every failure surfaces
/// immediately so it can be mapped onto the HTTP response.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Value, GatewayError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Bearer-authenticated client for OpenRouter, or any other endpoint that
/// speaks the OpenAI chat-completions dialect.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatGateway for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<Value, GatewayError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(GatewayError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                "completion endpoint returned an error"
            );
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(GatewayError::Unreachable)?;

        match serde_json::from_str::<Value>(&body) {
            Ok(envelope) => {
                debug!(model = %self.model, bytes = body.len(), "completion received");
                Ok(envelope)
            }
            Err(error) => {
                warn!(%error, "completion endpoint returned a non-JSON body");
                Err(GatewayError::InvalidEnvelope { raw: body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base: &str) -> OpenRouterClient {
        OpenRouterClient::new(
            format!("{base}/api/v1/chat/completions"),
            "test-key".to_string(),
            "openai/gpt-3.5-turbo".to_string(),
        )
    }

    fn chat_completion(content: &str) -> Value {
        json!({
            "id": "gen-test",
            "object": "chat.completion",
            "created": 1,
            "model": "openai/gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_complete_returns_raw_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "openai/gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "three courses please" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("[]")))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = client(&server.uri())
            .complete("three courses please")
            .await
            .unwrap();

        assert_eq!(envelope["choices"][0]["message"]["content"], "[]");
    }

    #[tokio::test]
    async fn test_non_2xx_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let error = client(&server.uri()).complete("hi").await.unwrap_err();

        match error {
            GatewayError::Upstream { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_2xx_non_json_body_is_invalid_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = client(&server.uri()).complete("hi").await.unwrap_err();

        match error {
            GatewayError::InvalidEnvelope { raw } => assert!(raw.contains("<html>")),
            other => panic!("expected InvalidEnvelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Bind a server to grab a free port, then vacate it.
        let server = MockServer::start().await;
        let base = server.uri();
        drop(server);

        let error = client(&base).complete("hi").await.unwrap_err();

        assert!(matches!(error, GatewayError::Unreachable(_)));
    }
}
