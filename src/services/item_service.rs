use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::aggregate::Totals;
use crate::db::{kv::KeyValueStore, list_repo};
use crate::error::{StoreError, StoreResult};
use crate::models::Item;

/// Owns each list's ordered item collection.
///
/// `replace_items` is the only write primitive. The edit helpers below all
/// read the full collection, change it in memory and hand it back to
/// `replace_items`, so the owning list's totals are always recomputed.
/// Callers must not interleave two edits of the same list.
#[derive(Clone)]
pub struct ItemStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ItemStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// The stored collection, or an empty one if the list has none.
    pub async fn get_items(&self, list_id: &str) -> StoreResult<Vec<Item>> {
        Ok(list_repo::load_items(self.kv(), list_id).await?)
    }

    /// Overwrites the collection, then stores the recomputed item count and
    /// total price on the owning list record (if there is one).
    ///
    /// Only new items and items whose name or price changed are validated;
    /// stored entries are accepted as they are.
    pub async fn replace_items(&self, list_id: &str, items: Vec<Item>) -> StoreResult<Vec<Item>> {
        let stored = self.get_items(list_id).await?;
        validate_items(&items, &stored)?;

        list_repo::save_items(self.kv(), list_id, &items).await?;

        let totals = Totals::of(&items);
        let owner = list_repo::update_list(self.kv(), list_id, |list| totals.apply_to(list)).await?;
        if owner.is_none() {
            debug!(list_id = %list_id, "items written for a list without a record");
        }

        info!(
            list_id = %list_id,
            items = totals.item_count,
            total = totals.total_price,
            "replaced items"
        );
        Ok(items)
    }

    pub async fn add_item(&self, list_id: &str, item: Item) -> StoreResult<Vec<Item>> {
        let mut items = self.get_items(list_id).await?;
        items.push(item);
        self.replace_items(list_id, items).await
    }

    /// Applies `edit` to the item with `item_id`. Unknown ids leave the
    /// collection untouched.
    pub async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        edit: impl FnOnce(&mut Item) + Send,
    ) -> StoreResult<Vec<Item>> {
        let mut items = self.get_items(list_id).await?;
        let Some(index) = items.iter().position(|item| item.id == item_id) else {
            debug!(list_id = %list_id, item_id = %item_id, "edit for unknown item ignored");
            return Ok(items);
        };
        edit(&mut items[index]);
        self.replace_items(list_id, items).await
    }

    pub async fn toggle_item(&self, list_id: &str, item_id: &str) -> StoreResult<Vec<Item>> {
        self.update_item(list_id, item_id, |item| item.checked = !item.checked)
            .await
    }

    pub async fn remove_item(&self, list_id: &str, item_id: &str) -> StoreResult<Vec<Item>> {
        let mut items = self.get_items(list_id).await?;
        let before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == before {
            debug!(list_id = %list_id, item_id = %item_id, "remove for unknown item ignored");
            return Ok(items);
        }
        self.replace_items(list_id, items).await
    }

    /// Moves the item at `from` to position `to` (clamped to the end).
    pub async fn move_item(&self, list_id: &str, from: usize, to: usize) -> StoreResult<Vec<Item>> {
        let mut items = self.get_items(list_id).await?;
        if from >= items.len() {
            return Err(StoreError::invalid(format!(
                "No item at position {from} (list has {})",
                items.len()
            )));
        }
        let item = items.remove(from);
        let to = to.min(items.len());
        items.insert(to, item);
        self.replace_items(list_id, items).await
    }
}

/// Rejects blank names and negative or non-finite prices on items that are
/// new or edited relative to `stored`, and any collection whose total price
/// is not finite.
pub(crate) fn validate_items(items: &[Item], stored: &[Item]) -> StoreResult<()> {
    let previous: HashMap<&str, &Item> =
        stored.iter().map(|item| (item.id.as_str(), item)).collect();
    for item in items {
        let unchanged = previous
            .get(item.id.as_str())
            .is_some_and(|old| old.name == item.name && old.price == item.price);
        if !unchanged {
            validate_item(item)?;
        }
    }
    if !Totals::of(items).total_price.is_finite() {
        return Err(StoreError::invalid("Total price is out of range"));
    }
    Ok(())
}

fn validate_item(item: &Item) -> StoreResult<()> {
    if item.name.trim().is_empty() {
        return Err(StoreError::invalid("Item name required"));
    }
    if let Some(price) = item.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(StoreError::invalid(format!(
            "Price of `{}` must be a non-negative number",
            item.name
        )));
    }
    Ok(())
}
