use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};

use super::KeyValueStore;
use crate::db::entities::kv_entry;
use crate::db::entities::prelude::KvEntry;
use crate::error::StorageResult;

/// Key-value store backed by the `kv_entries` table.
#[derive(Clone)]
pub struct SeaKv {
    db: DatabaseConnection,
}

impl SeaKv {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SeaKv {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entry = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|model| model.entry_value))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let model = kv_entry::ActiveModel {
            entry_key: Set(key.to_string()),
            entry_value: Set(value.to_string()),
        };
        KvEntry::insert(model)
            .on_conflict(
                OnConflict::column(kv_entry::Column::EntryKey)
                    .update_column(kv_entry::Column::EntryValue)
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        KvEntry::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        KvEntry::delete_many().exec(&self.db).await?;
        Ok(())
    }
}
