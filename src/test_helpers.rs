use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    db::{KeyValueStore, MemoryKv},
    error::{StorageError, StorageResult},
    services::StoreContext,
};

/// Stores over a fresh in-memory provider. The provider is returned too so
/// tests can look at raw keys.
pub fn memory_context() -> (Arc<MemoryKv>, StoreContext) {
    let kv = Arc::new(MemoryKv::new());
    let ctx = StoreContext::new(kv.clone());
    (kv, ctx)
}

/// Provider whose reads succeed from an inner store but whose writes fail
/// once `fail_writes` is set.
#[derive(Default)]
pub struct FlakyKv {
    inner: MemoryKv,
    fail_writes: std::sync::atomic::AtomicBool,
}

impl FlakyKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    fn check(&self) -> StorageResult<()> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyKv {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check()?;
        self.inner.remove(key).await
    }

    async fn clear(&self) -> StorageResult<()> {
        self.check()?;
        self.inner.clear().await
    }
}
