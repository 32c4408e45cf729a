//! Completion provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Result;

/// Configuration for a single completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "llama3-8b-8192".to_string(),
            max_tokens: 1000,
            temperature: Some(0.3),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait for hosted models that expand a draft prompt (e.g., Groq)
///
/// The API key is passed per call rather than held by the provider, so a
/// single provider instance keeps working after the user changes their key.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Expand `prompt` into a structured prompt and return the cleaned text
    async fn enhance(&self, prompt: &str, api_key: &str) -> Result<String>;

    /// Check whether the provider accepts `api_key`
    async fn validate_key(&self, api_key: &str) -> bool;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
