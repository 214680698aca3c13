pub mod item;
pub mod list;
pub mod quantity;
pub mod tag;

pub use item::Item;
pub use list::{ListPatch, NewList, ShoppingList};
pub use quantity::{Quantity, Unit};
pub use tag::{SubTagDef, TAXONOMY, Tag, TagDef};

/// Fresh opaque id. UUIDv7 is time-ordered and carries random bits, so two
/// ids minted in the same millisecond still differ.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
