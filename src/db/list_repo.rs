//! Record-level access to the persisted list collection and the per-list
//! item collections. No derived-field logic lives here.

use serde::{Serialize, de::DeserializeOwned};

use super::kv::KeyValueStore;
use crate::error::{StorageError, StorageResult};
use crate::models::{Item, ShoppingList};

pub const LISTS_KEY: &str = "@shopping_lists";
pub const ITEMS_KEY_PREFIX: &str = "@list_items";

pub fn items_key(list_id: &str) -> String {
    format!("{ITEMS_KEY_PREFIX}_{list_id}")
}

async fn read_json<T: DeserializeOwned + Default>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<T> {
    let Some(raw) = kv.get(key).await? else {
        return Ok(T::default());
    };
    serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

async fn write_json<T: Serialize + ?Sized>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    kv.set(key, &raw).await
}

pub async fn load_lists(kv: &dyn KeyValueStore) -> StorageResult<Vec<ShoppingList>> {
    read_json(kv, LISTS_KEY).await
}

pub async fn save_lists(kv: &dyn KeyValueStore, lists: &[ShoppingList]) -> StorageResult<()> {
    write_json(kv, LISTS_KEY, lists).await
}

pub async fn find_list(kv: &dyn KeyValueStore, id: &str) -> StorageResult<Option<ShoppingList>> {
    Ok(load_lists(kv).await?.into_iter().find(|list| list.id == id))
}

/// Applies `apply` to the record with `id` and persists the collection.
/// Returns the updated record, or `None` (nothing written) if absent.
pub async fn update_list(
    kv: &dyn KeyValueStore,
    id: &str,
    apply: impl FnOnce(&mut ShoppingList) + Send,
) -> StorageResult<Option<ShoppingList>> {
    let mut lists = load_lists(kv).await?;
    let Some(list) = lists.iter_mut().find(|list| list.id == id) else {
        return Ok(None);
    };
    apply(list);
    let updated = list.clone();
    save_lists(kv, &lists).await?;
    Ok(Some(updated))
}

/// Removes the record with `id`. Returns whether one was removed.
pub async fn remove_list(kv: &dyn KeyValueStore, id: &str) -> StorageResult<bool> {
    let mut lists = load_lists(kv).await?;
    let before = lists.len();
    lists.retain(|list| list.id != id);
    if lists.len() == before {
        return Ok(false);
    }
    save_lists(kv, &lists).await?;
    Ok(true)
}

pub async fn load_items(kv: &dyn KeyValueStore, list_id: &str) -> StorageResult<Vec<Item>> {
    read_json(kv, &items_key(list_id)).await
}

pub async fn save_items(
    kv: &dyn KeyValueStore,
    list_id: &str,
    items: &[Item],
) -> StorageResult<()> {
    write_json(kv, &items_key(list_id), items).await
}

pub async fn remove_items(kv: &dyn KeyValueStore, list_id: &str) -> StorageResult<()> {
    kv.remove(&items_key(list_id)).await
}
