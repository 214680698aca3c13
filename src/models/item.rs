use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::quantity::DEFAULT_QUANTITY;

/// One line entry within a list's item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tag: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
}

fn default_quantity() -> String {
    DEFAULT_QUANTITY.to_string()
}

// Older records may hold the price as text, or as something unusable.
pub(super) fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    })
}

impl Item {
    /// Creates an unchecked item with a fresh id.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
            quantity: quantity.into(),
            checked: false,
            image: None,
            description: None,
            sub_tag: None,
            price: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_sub_tag(mut self, sub_tag: impl Into<String>) -> Self {
        self.sub_tag = Some(sub_tag.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_without_empty_optionals() {
        let item = Item::new("Milk", "1 L").with_sub_tag("dairy");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["subTag"], "dairy");
        assert_eq!(json["checked"], false);
        assert!(json.get("price").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn reads_legacy_price_shapes() {
        let parse = |raw: &str| serde_json::from_str::<Item>(raw).unwrap().price;
        assert_eq!(parse(r#"{"id":"1","name":"a","price":2.5}"#), Some(2.5));
        assert_eq!(parse(r#"{"id":"1","name":"a","price":"1.25"}"#), Some(1.25));
        assert_eq!(parse(r#"{"id":"1","name":"a","price":"cheap"}"#), None);
        assert_eq!(parse(r#"{"id":"1","name":"a","price":null}"#), None);
        assert_eq!(parse(r#"{"id":"1","name":"a"}"#), None);
    }

    #[test]
    fn missing_quantity_defaults_to_one_piece() {
        let item: Item = serde_json::from_str(r#"{"id":"1","name":"Eggs"}"#).unwrap();
        assert_eq!(item.quantity, "1 pcs");
        assert!(!item.checked);
    }
}
