//! Enhancement service
//!
//! Ties the orchestrator to storage: resolves the default mode, records
//! history, manages the API key and answers channel messages.

use std::sync::Arc;
use tracing::{debug, info, warn};

use craft_core::{
    CompletionProvider, EnhancementRequest, EnhancementResult, Error, Result, Storage,
    UserSettings,
};

use crate::enhancer::PromptEnhancer;
use crate::messages::{Message, Response, ResponseBody};

/// Number of leading characters left visible by [`mask_api_key`]
const VISIBLE_KEY_PREFIX: usize = 4;
/// Keys this short are masked completely
const MIN_PARTIAL_MASK_LEN: usize = 8;

/// Hide all but the first few characters of an API key
pub fn mask_api_key(api_key: &str) -> String {
    let len = api_key.chars().count();
    if len == 0 {
        return String::new();
    }
    if len <= MIN_PARTIAL_MASK_LEN {
        return "*".repeat(len);
    }

    let prefix: String = api_key.chars().take(VISIBLE_KEY_PREFIX).collect();
    format!("{}{}", prefix, "*".repeat(len - VISIBLE_KEY_PREFIX))
}

/// What a key update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange {
    Saved,
    Removed,
}

impl KeyChange {
    pub fn message(&self) -> &'static str {
        match self {
            KeyChange::Saved => "API key saved successfully",
            KeyChange::Removed => "API key removed",
        }
    }
}

/// Masked view of the stored API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub masked: String,
    pub configured: bool,
}

pub struct EnhancementService<P: CompletionProvider> {
    enhancer: PromptEnhancer<P>,
    storage: Arc<dyn Storage>,
}

impl<P: CompletionProvider> EnhancementService<P> {
    pub fn new(provider: P, storage: Arc<dyn Storage>) -> Self {
        Self {
            enhancer: PromptEnhancer::new(provider),
            storage,
        }
    }

    /// Enhance a draft with the stored key, recording it in history when enabled
    pub async fn enhance(&self, request: EnhancementRequest) -> Result<EnhancementResult> {
        let settings = self.storage.settings().await?;
        let request = EnhancementRequest {
            mode: Some(request.mode.unwrap_or(settings.default_mode)),
            ..request
        };
        let api_key = self.storage.api_key().await?;

        let result = self.enhancer.enhance(&request, api_key.as_deref()).await?;

        if settings.save_history {
            self.storage
                .push_history(result.clone(), settings.max_history_items)
                .await?;
            debug!(max_items = settings.max_history_items, "Recorded enhancement in history");
        }

        Ok(result)
    }

    pub async fn settings(&self) -> Result<UserSettings> {
        self.storage.settings().await
    }

    pub async fn update_settings(&self, settings: &UserSettings) -> Result<()> {
        self.storage.save_settings(settings).await?;
        info!(default_mode = %settings.default_mode, "Settings updated");
        Ok(())
    }

    pub async fn history(&self) -> Result<Vec<EnhancementResult>> {
        self.storage.history().await
    }

    pub async fn api_key_status(&self) -> Result<ApiKeyStatus> {
        let api_key = self.storage.api_key().await?.unwrap_or_default();
        Ok(ApiKeyStatus {
            masked: mask_api_key(&api_key),
            configured: !api_key.trim().is_empty(),
        })
    }

    /// Store a trimmed key, or remove the stored key when `api_key` is blank
    pub async fn set_api_key(&self, api_key: &str) -> Result<KeyChange> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            self.storage.remove_api_key().await?;
            info!("API key removed");
            return Ok(KeyChange::Removed);
        }

        self.storage.save_api_key(api_key).await?;
        info!("API key saved");
        Ok(KeyChange::Saved)
    }

    /// Ask the provider whether the stored key works
    pub async fn validate_key(&self) -> Result<bool> {
        let api_key = self
            .storage
            .api_key()
            .await?
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential)?;

        Ok(self.enhancer.provider().validate_key(&api_key).await)
    }

    /// Answer one typed message; failures become `{success: false}` responses
    pub async fn handle(&self, message: Message) -> Response {
        let kind = message.kind();
        match self.dispatch(message).await {
            Ok(body) => Response::ok(body),
            Err(e) => {
                warn!(message_type = kind, error = %e, "Message failed");
                Response::failure(&e)
            }
        }
    }

    /// Parse and answer one raw JSON message
    pub async fn handle_line(&self, line: &str) -> Response {
        match Message::parse(line) {
            Ok(message) => self.handle(message).await,
            Err(e) => {
                warn!(error = %e, "Rejected message");
                Response::failure(&e)
            }
        }
    }

    async fn dispatch(&self, message: Message) -> Result<ResponseBody> {
        Ok(match message {
            Message::EnhancePrompt(request) => ResponseBody::Result {
                result: self.enhance(request).await?,
            },
            Message::GetSettings => ResponseBody::Settings {
                settings: self.settings().await?,
            },
            Message::UpdateSettings(settings) => {
                self.update_settings(&settings).await?;
                ResponseBody::Empty {}
            }
            Message::GetHistory => ResponseBody::History {
                history: self.history().await?,
            },
            Message::GetApiKey => {
                let status = self.api_key_status().await?;
                ResponseBody::ApiKey {
                    api_key: status.masked,
                    configured: status.configured,
                }
            }
            Message::SetApiKey(api_key) => ResponseBody::Message {
                message: self.set_api_key(&api_key).await?.message().to_string(),
            },
        })
    }
}
