//! Core traits and types for promptcraft
//!
//! This crate defines the data model shared by every other crate (modes,
//! classifications, enhancement results, user settings), the error taxonomy,
//! and the two seams the rest of the system is built around: the
//! [`CompletionProvider`] that talks to a hosted model and the [`Storage`]
//! that persists settings, history and the API key.

pub mod error;
pub mod llm;
pub mod storage;
pub mod types;


pub use error::{Error, Result};
pub use llm::{CompletionProvider, GenerationConfig};
pub use storage::{Storage, API_KEY_STORAGE_KEY};
pub use types::*;
