//! Flat key-value blob storage for the challenge gate.
//!
//! Models the browser-local storage the gate originally persisted into:
//! string keys, JSON-encoded string values, synchronous, no transactions.
//! Every read of a recognized key falls back to a documented default on
//! a missing or corrupt value rather than failing; writes are best-effort
//! and callers higher up the stack decide whether a failure is worth more
//! than a log line.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Well-known store keys.
pub mod keys {
    /// Currently required symbol (a single JSON string).
    pub const REQUIRED_SYMBOL: &str = "requiredSymbol";
    /// Bounded activity history, newest-first JSON array.
    pub const RECENT_ACTIVITIES: &str = "recentActivities";
    /// Summary of the most recent decision.
    pub const LAST_RESULT: &str = "lastResult";
    /// Saved gesture templates, insertion-order JSON array.
    pub const GESTURE_PATTERNS: &str = "gesture_patterns";
}

/// Error types for the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing medium rejected the write.
    #[error("store write failed: {0}")]
    WriteFailed(String),

    /// Value could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A flat string-keyed blob store.
///
/// Synchronous and transaction-free. `get` never fails: a key that cannot
/// be read is simply absent, and typed callers apply their own defaults
/// via [`get_json_or`].
pub trait BlobStore: Send + Sync {
    /// Read the raw value stored at `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value at `key` if present.
    fn remove(&self, key: &str);

    /// Remove every stored value.
    fn clear(&self);
}

/// Read and decode a JSON value.
///
/// Returns `None` for a missing key or a corrupt value; corrupt values
/// are logged at debug and otherwise indistinguishable from absence.
pub fn get_json<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(key = %key, error = %err, "Discarding corrupt stored value");
            None
        }
    }
}

/// Read and decode a JSON value, falling back to `default` on a missing
/// or corrupt key.
pub fn get_json_or<T: DeserializeOwned>(store: &dyn BlobStore, key: &str, default: T) -> T {
    get_json(store, key).unwrap_or(default)
}

/// Encode and write a JSON value.
pub fn put_json<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
