//! Search, filter and sort over already-loaded lists and items.

use std::cmp::Ordering;

use crate::models::{Item, ShoppingList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    /// Stored order: most recently created first.
    #[default]
    Newest,
    Oldest,
    Title,
    /// Highest total first.
    TotalPrice,
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub tag_id: Option<String>,
    pub sort: ListSort,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn filter_lists(lists: Vec<ShoppingList>, query: &ListQuery) -> Vec<ShoppingList> {
    let search = blank_to_none(query.search.as_deref());
    let tag_id = blank_to_none(query.tag_id.as_deref());

    let mut matched: Vec<_> = lists
        .into_iter()
        .filter(|list| search.is_none_or(|needle| contains_ignore_case(&list.title, needle)))
        .filter(|list| {
            tag_id.is_none_or(|id| list.tag.as_ref().is_some_and(|tag| tag.id == id))
        })
        .collect();

    match query.sort {
        ListSort::Newest => {}
        ListSort::Oldest => matched.reverse(),
        ListSort::Title => {
            matched.sort_by_key(|list| list.title.to_lowercase());
        }
        ListSort::TotalPrice => matched.sort_by(|a, b| {
            b.total_price
                .partial_cmp(&a.total_price)
                .unwrap_or(Ordering::Equal)
        }),
    }
    matched
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckedFilter {
    #[default]
    All,
    Checked,
    Unchecked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    /// Collection order.
    #[default]
    Manual,
    Name,
    /// Unchecked items first, collection order within each group.
    UncheckedFirst,
    /// Highest price first; unpriced items last.
    Price,
}

#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub checked: CheckedFilter,
    pub sub_tag: Option<String>,
    pub sort: ItemSort,
}

pub fn filter_items(items: Vec<Item>, query: &ItemQuery) -> Vec<Item> {
    let search = blank_to_none(query.search.as_deref());
    let sub_tag = blank_to_none(query.sub_tag.as_deref());

    let mut matched: Vec<_> = items
        .into_iter()
        .filter(|item| match query.checked {
            CheckedFilter::All => true,
            CheckedFilter::Checked => item.checked,
            CheckedFilter::Unchecked => !item.checked,
        })
        .filter(|item| {
            search.is_none_or(|needle| {
                contains_ignore_case(&item.name, needle)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|text| contains_ignore_case(text, needle))
            })
        })
        .filter(|item| sub_tag.is_none_or(|id| item.sub_tag.as_deref() == Some(id)))
        .collect();

    match query.sort {
        ItemSort::Manual => {}
        ItemSort::Name => matched.sort_by_key(|item| item.name.to_lowercase()),
        ItemSort::UncheckedFirst => matched.sort_by_key(|item| item.checked),
        ItemSort::Price => matched.sort_by(|a, b| match (a.price, b.price) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
    matched
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::tag::find_tag;

    fn list(id: &str, title: &str, tag: Option<&str>, total: f64) -> ShoppingList {
        ShoppingList {
            id: id.to_string(),
            title: title.to_string(),
            note: None,
            tag: tag.and_then(find_tag).map(|t| t.to_tag()),
            created_at: Utc::now(),
            item_count: 0,
            total_price: total,
            is_archived: false,
        }
    }

    fn sample_lists() -> Vec<ShoppingList> {
        vec![
            list("3", "weekend party", Some("grocery"), 40.0),
            list("2", "Hardware", Some("household"), 75.5),
            list("1", "Weekly groceries", Some("grocery"), 12.0),
        ]
    }

    fn ids(lists: &[ShoppingList]) -> Vec<&str> {
        lists.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_and_keeps_order() {
        let query = ListQuery {
            search: Some("WEEK".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_lists(sample_lists(), &query)), vec!["3", "1"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let query = ListQuery {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_lists(sample_lists(), &query).len(), 3);
    }

    #[test]
    fn list_sorts() {
        let by = |sort| {
            let query = ListQuery {
                sort,
                ..Default::default()
            };
            filter_lists(sample_lists(), &query)
        };
        assert_eq!(ids(&by(ListSort::Oldest)), vec!["1", "2", "3"]);
        assert_eq!(ids(&by(ListSort::Title)), vec!["2", "3", "1"]);
        assert_eq!(ids(&by(ListSort::TotalPrice)), vec!["2", "3", "1"]);
    }

    #[test]
    fn tag_filter() {
        let query = ListQuery {
            tag_id: Some("household".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_lists(sample_lists(), &query)), vec!["2"]);
    }

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new("Milk", "1 L").with_price(2.5).checked(true),
            Item::new("apples", "1 kg").with_sub_tag("fruits"),
            Item::new("Bread", "1 pcs")
                .with_price(3.0)
                .with_description("whole grain"),
        ]
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn item_filters() {
        let unchecked = ItemQuery {
            checked: CheckedFilter::Unchecked,
            ..Default::default()
        };
        assert_eq!(names(&filter_items(sample_items(), &unchecked)), vec!["apples", "Bread"]);

        let by_description = ItemQuery {
            search: Some("GRAIN".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter_items(sample_items(), &by_description)), vec!["Bread"]);

        let by_sub_tag = ItemQuery {
            sub_tag: Some("fruits".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter_items(sample_items(), &by_sub_tag)), vec!["apples"]);
    }

    #[test]
    fn item_sorts() {
        let by = |sort| {
            let query = ItemQuery {
                sort,
                ..Default::default()
            };
            filter_items(sample_items(), &query)
        };
        assert_eq!(names(&by(ItemSort::Name)), vec!["apples", "Bread", "Milk"]);
        assert_eq!(names(&by(ItemSort::UncheckedFirst)), vec!["apples", "Bread", "Milk"]);
        assert_eq!(names(&by(ItemSort::Price)), vec!["Bread", "Milk", "apples"]);
    }
}
