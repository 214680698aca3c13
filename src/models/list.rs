use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::item::{Item, lenient_price};
use super::tag::Tag;

/// A shopping list record as persisted in the list collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub item_count: usize,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total_price: f64,
    #[serde(default)]
    pub is_archived: bool,
}

// A non-finite total is written as `null`; read it back as zero so the
// collection stays loadable.
fn lenient_total<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_price(deserializer)?.unwrap_or_default())
}

/// Input for creating a list.
#[derive(Debug, Clone, Default)]
pub struct NewList {
    pub title: String,
    pub note: Option<String>,
    pub tag: Option<Tag>,
    pub items: Vec<Item>,
}

impl NewList {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

/// Metadata edit. `None` leaves a field as it is; `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub title: Option<String>,
    pub note: Option<Option<String>>,
    pub tag: Option<Option<Tag>>,
}
