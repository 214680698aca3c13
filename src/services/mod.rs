use std::sync::Arc;

use crate::db::kv::KeyValueStore;
use crate::error::StorageResult;

pub mod aggregate;
pub mod currency;
pub mod interchange;
pub mod item_service;
pub mod list_service;
pub mod query;

pub use aggregate::Totals;
pub use interchange::{ImportReport, Interchange};
pub use item_service::ItemStore;
pub use list_service::ListStore;

/// Hands out the stores over one shared key-value provider.
#[derive(Clone)]
pub struct StoreContext {
    kv: Arc<dyn KeyValueStore>,
}

impl StoreContext {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn lists(&self) -> ListStore {
        ListStore::new(Arc::clone(&self.kv))
    }

    pub fn items(&self) -> ItemStore {
        ItemStore::new(Arc::clone(&self.kv))
    }

    pub fn interchange(&self) -> Interchange {
        Interchange::new(self.lists(), self.items())
    }

    /// Wipes every list and item.
    pub async fn reset(&self) -> StorageResult<()> {
        self.kv.clear().await
    }
}
