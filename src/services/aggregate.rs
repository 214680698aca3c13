use crate::models::{Item, ShoppingList};

/// Derived fields of a list, computed from its item collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub item_count: usize,
    pub total_price: f64,
}

impl Totals {
    pub fn of(items: &[Item]) -> Self {
        Self {
            item_count: compute_item_count(items),
            total_price: compute_total_price(items),
        }
    }

    pub fn apply_to(self, list: &mut ShoppingList) {
        list.item_count = self.item_count;
        list.total_price = self.total_price;
    }
}

pub fn compute_item_count(items: &[Item]) -> usize {
    items.len()
}

pub fn compute_total_price(items: &[Item]) -> f64 {
    items
        .iter()
        .filter_map(|item| item.price)
        .filter(|price| price.is_finite())
        .sum()
}
