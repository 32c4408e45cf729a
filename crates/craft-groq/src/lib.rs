//! Groq integration for promptcraft
//!
//! This crate provides the Groq implementation of the CompletionProvider trait.

mod client;
mod config;
mod postprocess;
mod prompts;

#[cfg(test)]
mod tests;

pub use client::GroqClient;
pub use config::GroqConfig;
pub use postprocess::clean_response;

// Re-export core types for convenience
pub use craft_core::{CompletionProvider, Error, GenerationConfig, Result};
