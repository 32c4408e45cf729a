//! Groq configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use craft_core::{Error, GenerationConfig, Result};

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Groq client
///
/// The API key is not part of the configuration; it is supplied per
/// request from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl GroqConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("GROQ_API_URL").unwrap_or(defaults.api_url);
        let model = env::var("GROQ_MODEL").unwrap_or(defaults.model);

        let timeout_secs = match env::var("GROQ_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                Error::Configuration(format!("GROQ_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            api_url,
            model,
            timeout_secs,
            ..defaults
        })
    }

    /// Point the client at a different endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Generation parameters for an enhancement request
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            model_id: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 1000,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
