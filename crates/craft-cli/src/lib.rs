//! Enhancement service, message channel and terminal UI for promptcraft

pub mod channel;
mod enhancer;
pub mod messages;
mod service;
pub mod ui;

#[cfg(test)]
mod tests;

pub use enhancer::{ENHANCEMENT_MARKERS, PromptEnhancer, is_already_enhanced};
pub use messages::{Message, Response, ResponseBody};
pub use service::{ApiKeyStatus, EnhancementService, KeyChange, mask_api_key};
pub use ui::{display_banner, handle_input_with_history};

// Re-export core types
pub use craft_core::{Error, Result};
