//! Storage backends for promptcraft
//!
//! [`FileStorage`] keeps JSON documents in a data directory and survives
//! restarts; [`MemoryStorage`] keeps everything in process.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

// Re-export core types
pub use craft_core::{Error, Result, Storage};

/// Prepend `entry` to `history` and drop the oldest items beyond `max_items`
pub(crate) fn prepend_bounded<T>(history: &mut Vec<T>, entry: T, max_items: usize) {
    history.insert(0, entry);
    history.truncate(max_items);
}
