pub mod json_store;
pub mod mastery_store;
pub mod memory_store;
pub mod schema;

use thiserror::Error;

pub use json_store::JsonStore;
pub use mastery_store::{MasteryStore, PersistedProfile, SessionState};
pub use memory_store::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable string storage keyed by name. Absence is not an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
