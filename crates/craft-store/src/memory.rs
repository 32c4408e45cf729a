//! In-process storage

use async_trait::async_trait;
use tokio::sync::RwLock;

use craft_core::{EnhancementResult, Result, Storage, UserSettings};

use crate::prepend_bounded;

/// Storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    settings: RwLock<Option<UserSettings>>,
    history: RwLock<Vec<EnhancementResult>>,
    api_key: RwLock<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an API key already stored
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: RwLock::new(Some(api_key.into())),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn settings(&self) -> Result<UserSettings> {
        Ok(self.settings.read().await.clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn history(&self) -> Result<Vec<EnhancementResult>> {
        Ok(self.history.read().await.clone())
    }

    async fn push_history(&self, entry: EnhancementResult, max_items: usize) -> Result<()> {
        prepend_bounded(&mut *self.history.write().await, entry, max_items);
        Ok(())
    }

    async fn api_key(&self) -> Result<Option<String>> {
        Ok(self.api_key.read().await.clone())
    }

    async fn save_api_key(&self, api_key: &str) -> Result<()> {
        *self.api_key.write().await = Some(api_key.to_string());
        Ok(())
    }

    async fn remove_api_key(&self) -> Result<()> {
        *self.api_key.write().await = None;
        Ok(())
    }
}
