//! Rule-based prompt rewriting for promptcraft
//!
//! [`classify`] derives coarse features from a draft prompt and [`rewrite`]
//! turns the draft into a structured prompt using fixed templates. Both are
//! pure functions: no I/O, no randomness, and no failure modes.

mod classifier;
mod rewriter;
mod templates;


pub use classifier::{classify, extract_topic};
pub use rewriter::{enhance_locally, extract_subject_from_request, rewrite};

// Re-export core types
pub use craft_core::{Classification, Intent, Mode};
