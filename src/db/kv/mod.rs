use async_trait::async_trait;

use crate::error::StorageResult;

mod memory;
mod sea;

pub use memory::MemoryKv;
pub use sea::SeaKv;

/// Key-value persistence the stores are built on.
///
/// Values are opaque text; the stores keep JSON documents in them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    async fn clear(&self) -> StorageResult<()>;
}
