//! Enhancement orchestrator
//!
//! Decides whether a draft needs enhancing at all, checks the credential and
//! delegates to the completion provider exactly once.

use tracing::{debug, instrument};

use craft_core::{CompletionProvider, EnhancementRequest, EnhancementResult, Error, Result};

/// Phrases that only appear in text that was already enhanced
pub const ENHANCEMENT_MARKERS: [&str; 8] = [
    "Please define specific criteria",
    "Please provide a specific and detailed response",
    "Please include:",
    "Background:",
    "Context:",
    "Detailed Request:",
    "Professional Analysis:",
    "Creative Brief:",
];

/// True when `text` carries any enhancement marker (case-sensitive)
pub fn is_already_enhanced(text: &str) -> bool {
    ENHANCEMENT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Orchestrates a single enhancement against a completion provider
pub struct PromptEnhancer<P: CompletionProvider> {
    provider: P,
}

impl<P: CompletionProvider> PromptEnhancer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Enhance `request.text`; a request without a mode uses the default mode
    ///
    /// Already-enhanced text is returned unchanged without a key and without
    /// a remote call. Provider failures are returned as-is.
    #[instrument(skip_all, fields(mode = ?request.mode))]
    pub async fn enhance(
        &self,
        request: &EnhancementRequest,
        api_key: Option<&str>,
    ) -> Result<EnhancementResult> {
        let mode = request.mode.unwrap_or_default();
        let text = request.text.as_str();

        if is_already_enhanced(text) {
            debug!("Text already enhanced, returning it unchanged");
            return Ok(EnhancementResult::new(text, text, mode));
        }

        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        debug!(model = self.provider.model_id(), "Requesting remote enhancement");
        let enhanced = self.provider.enhance(text, api_key).await?;

        Ok(EnhancementResult::new(text, enhanced, mode))
    }
}
