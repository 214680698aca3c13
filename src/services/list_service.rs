use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::aggregate::Totals;
use super::item_service::validate_items;
use crate::db::{kv::KeyValueStore, list_repo};
use crate::error::{StoreError, StoreResult};
use crate::models::{ListPatch, NewList, ShoppingList, new_id};

/// Owns the collection of list records.
#[derive(Clone)]
pub struct ListStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ListStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// Creates a list, newest first in the stored order, and writes its
    /// initial item collection under the new id.
    ///
    /// The list record and the item collection are two separate writes; a
    /// failure between them leaves the record without items.
    pub async fn create_list(&self, input: NewList) -> StoreResult<ShoppingList> {
        let NewList {
            title,
            note,
            tag,
            items,
        } = input;
        let title = normalize_title(&title)?.to_string();
        validate_items(&items, &[])?;

        let totals = Totals::of(&items);
        let list = ShoppingList {
            id: new_id(),
            title,
            note,
            tag,
            created_at: Utc::now(),
            item_count: totals.item_count,
            total_price: totals.total_price,
            is_archived: false,
        };

        let mut lists = list_repo::load_lists(self.kv()).await?;
        lists.insert(0, list.clone());
        list_repo::save_lists(self.kv(), &lists).await?;
        list_repo::save_items(self.kv(), &list.id, &items).await?;

        info!(list_id = %list.id, items = list.item_count, "created list");
        Ok(list)
    }

    pub async fn get_list(&self, id: &str) -> StoreResult<Option<ShoppingList>> {
        Ok(list_repo::find_list(self.kv(), id).await?)
    }

    /// All lists in stored order, optionally without the archived ones.
    pub async fn list_lists(&self, include_archived: bool) -> StoreResult<Vec<ShoppingList>> {
        let lists = list_repo::load_lists(self.kv()).await?;
        if include_archived {
            return Ok(lists);
        }
        Ok(lists.into_iter().filter(|list| !list.is_archived).collect())
    }

    pub async fn list_archived(&self) -> StoreResult<Vec<ShoppingList>> {
        let lists = list_repo::load_lists(self.kv()).await?;
        Ok(lists.into_iter().filter(|list| list.is_archived).collect())
    }

    pub async fn archive_list(&self, id: &str) -> StoreResult<()> {
        self.set_archived(id, true).await
    }

    pub async fn unarchive_list(&self, id: &str) -> StoreResult<()> {
        self.set_archived(id, false).await
    }

    async fn set_archived(&self, id: &str, archived: bool) -> StoreResult<()> {
        let updated = list_repo::update_list(self.kv(), id, |list| {
            list.is_archived = archived;
        })
        .await?;
        match updated {
            Some(_) => info!(list_id = %id, archived, "updated archive state"),
            None => debug!(list_id = %id, "archive state change for unknown list ignored"),
        }
        Ok(())
    }

    /// Edits title, note or tag. Derived fields are left alone.
    pub async fn update_list(
        &self,
        id: &str,
        patch: ListPatch,
    ) -> StoreResult<Option<ShoppingList>> {
        let ListPatch { title, note, tag } = patch;
        let title = match title {
            Some(value) => Some(normalize_title(&value)?.to_string()),
            None => None,
        };

        let updated = list_repo::update_list(self.kv(), id, move |list| {
            if let Some(title) = title {
                list.title = title;
            }
            if let Some(note) = note {
                list.note = note;
            }
            if let Some(tag) = tag {
                list.tag = tag;
            }
        })
        .await?;
        if updated.is_none() {
            debug!(list_id = %id, "update for unknown list ignored");
        }
        Ok(updated)
    }

    /// Removes the record and its item collection. Unknown ids are a no-op.
    pub async fn delete_list(&self, id: &str) -> StoreResult<()> {
        let removed = list_repo::remove_list(self.kv(), id).await?;
        list_repo::remove_items(self.kv(), id).await?;
        if removed {
            info!(list_id = %id, "deleted list");
        } else {
            debug!(list_id = %id, "delete for unknown list ignored");
        }
        Ok(())
    }
}

fn normalize_title(title: &str) -> StoreResult<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::invalid("Title required"));
    }
    Ok(trimmed)
}
