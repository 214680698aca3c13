//! Text export/import of all lists and their items.
//!
//! Payload layout, one block per list:
//!
//! ```text
//! "<title>","<category>","<createdAt>"
//! "<name>","<quantity>","<item category>","<true|false>"
//! ---
//! ```
//!
//! Fields are always quoted and embedded quotes are doubled, so payloads
//! written by older versions (which never escaped anything) still read back.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use tracing::{info, warn};

use super::{item_service::ItemStore, list_service::ListStore};
use crate::error::{ExportError, ImportError};
use crate::models::quantity::DEFAULT_QUANTITY;
use crate::models::tag::{default_tag, find_tag, find_tag_by_label, match_sub_tag};
use crate::models::{Item, NewList, ShoppingList};

pub const BLOCK_SEPARATOR: &str = "---";
pub const DEFAULT_LIST_CATEGORY: &str = "General";
pub const DEFAULT_ITEM_CATEGORY: &str = "Uncategorized";

pub fn list_category(list: &ShoppingList) -> &str {
    list.tag
        .as_ref()
        .map(|tag| tag.label.as_str())
        .unwrap_or(DEFAULT_LIST_CATEGORY)
}

/// Label of the item's sub-tag under the list's tag, or the default label.
pub fn item_category(list: &ShoppingList, item: &Item) -> &'static str {
    list.tag
        .as_ref()
        .and_then(|tag| find_tag(&tag.id))
        .zip(item.sub_tag.as_deref())
        .and_then(|(tag, sub_id)| tag.sub_tag(sub_id))
        .map(|sub| sub.label)
        .unwrap_or(DEFAULT_ITEM_CATEGORY)
}

fn encode_block(list: &ShoppingList, items: &[Item]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let created_at = list.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    writer.write_record([list.title.as_str(), list_category(list), created_at.as_str()])?;

    for item in items {
        let quantity = if item.quantity.trim().is_empty() {
            DEFAULT_QUANTITY
        } else {
            item.quantity.as_str()
        };
        let checked = if item.checked { "true" } else { "false" };
        writer.write_record([
            item.name.as_str(),
            quantity,
            item_category(list, item),
            checked,
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    let mut block = String::from_utf8(bytes)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    block.push_str(BLOCK_SEPARATOR);
    block.push('\n');
    Ok(block)
}

/// Serializes lists with their items into one payload.
pub fn encode(lists: &[(ShoppingList, Vec<Item>)]) -> Result<String, ExportError> {
    let mut payload = String::new();
    for (list, items) in lists {
        payload.push_str(&encode_block(list, items)?);
    }
    Ok(payload)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub name: String,
    pub quantity: String,
    pub category: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedList {
    pub title: String,
    pub category: String,
    /// Read for completeness; imported lists get a fresh creation time.
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub lists: Vec<ParsedList>,
    pub skipped_blocks: usize,
}

fn split_blocks(payload: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in payload.lines() {
        if line.trim() == BLOCK_SEPARATOR {
            blocks.push(std::mem::take(&mut current));
        } else if !line.trim().is_empty() {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_block(lines: &[&str]) -> Result<Option<ParsedList>, csv::Error> {
    let text = lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(header) = records.next().transpose()? else {
        return Ok(None);
    };
    let title = header.get(0).unwrap_or_default().to_string();
    if title.is_empty() {
        return Ok(None);
    }
    let category = header.get(1).unwrap_or_default().to_string();
    let created_at = header
        .get(2)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc));

    let mut items = Vec::new();
    for record in records {
        let record = record?;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let quantity = match record.get(1) {
            Some(q) if !q.is_empty() => q,
            _ => DEFAULT_QUANTITY,
        };
        items.push(ParsedItem {
            name: name.to_string(),
            quantity: quantity.to_string(),
            category: record.get(2).unwrap_or_default().to_string(),
            checked: record.get(3) == Some("true"),
        });
    }

    Ok(Some(ParsedList {
        title,
        category,
        created_at,
        items,
    }))
}

/// Parses a payload. Blocks with fewer than two non-empty lines, blocks that
/// cannot be read and blocks without a title are skipped and counted.
pub fn decode(payload: &str) -> Decoded {
    let mut decoded = Decoded::default();
    for (index, lines) in split_blocks(payload).into_iter().enumerate() {
        if lines.is_empty() {
            continue;
        }
        if lines.len() < 2 {
            warn!(block = index, "skipping import block without items");
            decoded.skipped_blocks += 1;
            continue;
        }
        match parse_block(&lines) {
            Ok(Some(list)) => decoded.lists.push(list),
            Ok(None) => {
                warn!(block = index, "skipping import block without a title");
                decoded.skipped_blocks += 1;
            }
            Err(err) => {
                warn!(block = index, error = %err, "skipping unreadable import block");
                decoded.skipped_blocks += 1;
            }
        }
    }
    decoded
}

/// Maps free-text categories onto the taxonomy. The list always gets a tag:
/// the exact label match, or the first taxonomy entry.
pub fn reconcile(parsed: ParsedList) -> NewList {
    let tag = find_tag_by_label(&parsed.category).unwrap_or_else(default_tag);
    let items = parsed
        .items
        .into_iter()
        .map(|entry| {
            let mut item = Item::new(entry.name, entry.quantity).checked(entry.checked);
            item.sub_tag = match_sub_tag(&entry.category, tag.sub_tags).map(str::to_string);
            item
        })
        .collect();

    NewList::titled(parsed.title)
        .with_tag(tag.to_tag())
        .with_items(items)
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub created: Vec<ShoppingList>,
    pub skipped_blocks: usize,
}

/// Export/import entry points over the list and item stores.
#[derive(Clone)]
pub struct Interchange {
    lists: ListStore,
    items: ItemStore,
}

impl Interchange {
    pub fn new(lists: ListStore, items: ItemStore) -> Self {
        Self { lists, items }
    }

    /// Every list, archived or not, in stored order.
    pub async fn export_all(&self) -> Result<String, ExportError> {
        let lists = self.lists.list_lists(true).await?;
        let mut entries = Vec::with_capacity(lists.len());
        for list in lists {
            let items = self.items.get_items(&list.id).await?;
            entries.push((list, items));
        }
        let payload = encode(&entries)?;
        info!(lists = entries.len(), "exported lists");
        Ok(payload)
    }

    /// Creates one new list per usable block. Lists created before a store
    /// failure are kept.
    pub async fn import(&self, payload: &str) -> Result<ImportReport, ImportError> {
        let decoded = decode(payload);
        if decoded.lists.is_empty() {
            return Err(ImportError::NoValidBlocks);
        }

        let mut created = Vec::with_capacity(decoded.lists.len());
        for parsed in decoded.lists {
            let list = self.lists.create_list(reconcile(parsed)).await?;
            created.push(list);
        }

        info!(
            created = created.len(),
            skipped = decoded.skipped_blocks,
            "imported lists"
        );
        Ok(ImportReport {
            created,
            skipped_blocks: decoded.skipped_blocks,
        })
    }

    pub async fn export_to_file(&self, path: &Path) -> Result<usize, ExportError> {
        let payload = self.export_all().await?;
        tokio::fs::write(path, payload.as_bytes()).await?;
        Ok(payload.len())
    }

    pub async fn import_from_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let payload = tokio::fs::read_to_string(path).await?;
        self.import(&payload).await
    }
}
