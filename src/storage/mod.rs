//! Durable key-value storage holding the serialized cart.

pub mod file;
pub mod memory;

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Synchronous string store addressed by key, last writer wins.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
