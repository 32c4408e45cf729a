//! Persistence trait for settings, history and the API key

use async_trait::async_trait;

use crate::{EnhancementResult, Result, UserSettings};

/// Key under which the API key is persisted
pub const API_KEY_STORAGE_KEY: &str = "groqApiKey";

/// Trait for settings, history and credential persistence
///
/// Settings and the credential live in "synced" storage, history in
/// "local" storage. Backends decide what that means physically.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stored settings, or the defaults when nothing was saved yet
    async fn settings(&self) -> Result<UserSettings>;

    /// Replace the stored settings
    async fn save_settings(&self, settings: &UserSettings) -> Result<()>;

    /// Enhancement history, newest first
    async fn history(&self) -> Result<Vec<EnhancementResult>>;

    /// Prepend `entry` and truncate the history to `max_items`
    async fn push_history(&self, entry: EnhancementResult, max_items: usize) -> Result<()>;

    /// The stored API key, if any
    async fn api_key(&self) -> Result<Option<String>>;

    /// Store the API key verbatim
    async fn save_api_key(&self, api_key: &str) -> Result<()>;

    /// Forget the API key
    async fn remove_api_key(&self) -> Result<()>;
}
