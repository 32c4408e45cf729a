//! Groq chat-completion client implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use craft_core::{CompletionProvider, Error, GenerationConfig, Result};

use crate::config::GroqConfig;
use crate::postprocess::clean_response;
use crate::prompts::{PING_PROMPT, SYSTEM_PROMPT, user_prompt};

const PING_MAX_TOKENS: u32 = 5;

/// Groq client
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Model constants
    pub const LLAMA3_8B: &'static str = "llama3-8b-8192";
    pub const LLAMA3_70B: &'static str = "llama3-70b-8192";

    /// Create a new Groq client from configuration
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Groq client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GroqConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for completions
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    async fn send(&self, request: &ChatRequest<'_>, api_key: &str) -> Result<reqwest::Response> {
        self.client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)
    }

    /// Send one chat-completion request and return the raw first choice
    async fn perform_completion(
        &self,
        messages: Vec<ChatMessage<'_>>,
        config: &GenerationConfig,
        api_key: &str,
    ) -> Result<String> {
        let request_body = ChatRequest {
            model: &config.model_id,
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let response = self.send(&request_body, api_key).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "Groq API returned an error");
            return Err(status_error(status));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(e.to_string())
                } else {
                    Error::Serialization(e.to_string())
                }
            })?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::EmptyResponse);
        }

        Ok(content)
    }

    /// Run a completion under the configured deadline
    async fn complete(
        &self,
        messages: Vec<ChatMessage<'_>>,
        config: &GenerationConfig,
        api_key: &str,
    ) -> Result<String> {
        match timeout(config.timeout, self.perform_completion(messages, config, api_key)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "no response from Groq within {}s",
                config.timeout.as_secs()
            ))),
        }
    }
}

/// Map a failed send; the client-level deadline surfaces as a timeout
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Network(e.to_string())
    }
}

/// Map a non-success HTTP status onto the error taxonomy
fn status_error(status: StatusCode) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::InvalidCredential,
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        StatusCode::BAD_REQUEST => Error::MalformedRequest,
        other => Error::Upstream {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    #[instrument(skip(self, prompt, api_key), fields(model = %self.config.model, prompt_chars = prompt.chars().count()))]
    async fn enhance(&self, prompt: &str, api_key: &str) -> Result<String> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        let user_message = user_prompt(prompt);
        let messages = vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: &user_message,
            },
        ];

        let raw = self.complete(messages, &self.config.generation(), api_key).await?;
        let cleaned = clean_response(&raw);

        if cleaned.is_empty() {
            warn!("Groq response contained only boilerplate");
            return Err(Error::EmptyResponse);
        }

        debug!(enhanced_chars = cleaned.chars().count(), "Prompt enhanced");
        Ok(cleaned)
    }

    #[instrument(skip(self, api_key))]
    async fn validate_key(&self, api_key: &str) -> bool {
        if api_key.trim().is_empty() {
            return false;
        }

        let config = self.config.generation();
        let request = ChatRequest {
            model: &config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: PING_PROMPT,
            }],
            temperature: None,
            max_tokens: PING_MAX_TOKENS,
        };

        // Only the status matters; the reply body is never decoded
        match timeout(config.timeout, self.send(&request, api_key)).await {
            Ok(Ok(response)) if response.status().is_success() => true,
            Ok(Ok(response)) => {
                debug!(status = response.status().as_u16(), "API key rejected");
                false
            }
            Ok(Err(e)) => {
                debug!(error = %e, "API key validation failed");
                false
            }
            Err(_) => {
                debug!(timeout_secs = config.timeout.as_secs(), "API key validation timed out");
                false
            }
        }
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(StatusCode::UNAUTHORIZED), Error::InvalidCredential));
        assert!(matches!(status_error(StatusCode::TOO_MANY_REQUESTS), Error::RateLimited));
        assert!(matches!(status_error(StatusCode::BAD_REQUEST), Error::MalformedRequest));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY),
            Error::Upstream { status: 502, .. }
        ));
    }

    #[tokio::test]
    async fn test_client_deadline_maps_to_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = GroqClient::new(GroqConfig {
            api_url: format!("http://{addr}/openai/v1/chat/completions"),
            timeout_secs: 1,
            ..GroqConfig::default()
        })
        .unwrap();
        let request = ChatRequest {
            model: GroqClient::LLAMA3_8B,
            messages: vec![],
            temperature: None,
            max_tokens: PING_MAX_TOKENS,
        };

        let err = client.send(&request, "gsk_test").await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
    }

    #[test]
    fn test_with_model() {
        let client = GroqClient::new(GroqConfig::default())
            .unwrap()
            .with_model(GroqClient::LLAMA3_70B);
        assert_eq!(client.model_id(), "llama3-70b-8192");
    }
}
