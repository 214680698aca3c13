//! Fixed category taxonomy.
//!
//! Lists carry one of the top-level tags below; items may carry a sub-tag
//! id that is only meaningful under their list's tag.

use serde::{Deserialize, Serialize};

/// Tag reference as stored on a list record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub icon: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTagDef {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDef {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub sub_tags: &'static [SubTagDef],
}

impl TagDef {
    pub fn to_tag(&self) -> Tag {
        Tag {
            id: self.id.to_string(),
            icon: self.icon.to_string(),
            label: self.label.to_string(),
            color: self.color.to_string(),
        }
    }

    pub fn sub_tag(&self, id: &str) -> Option<&'static SubTagDef> {
        self.sub_tags.iter().find(|sub| sub.id == id)
    }
}

const fn sub(id: &'static str, label: &'static str) -> SubTagDef {
    SubTagDef { id, label }
}

pub static TAXONOMY: &[TagDef] = &[
    TagDef {
        id: "grocery",
        icon: "cart-outline",
        label: "Groceries",
        color: "#E6A4B4",
        sub_tags: &[
            sub("fruits", "Fruits"),
            sub("vegetables", "Vegetables"),
            sub("dairy", "Dairy"),
            sub("bakery", "Bakery"),
            sub("meat", "Meat & Fish"),
            sub("beverages", "Beverages"),
            sub("snacks", "Snacks"),
            sub("frozen", "Frozen Foods"),
            sub("pantry", "Pantry"),
        ],
    },
    TagDef {
        id: "household",
        icon: "home-outline",
        label: "Household",
        color: "#A4C3E6",
        sub_tags: &[
            sub("cleaning", "Cleaning Supplies"),
            sub("laundry", "Laundry"),
            sub("kitchen", "Kitchen"),
            sub("bathroom", "Bathroom"),
            sub("paper", "Paper Goods"),
        ],
    },
    TagDef {
        id: "personal_care",
        icon: "face-man-shimmer-outline",
        label: "Personal Care",
        color: "#C8A4E6",
        sub_tags: &[
            sub("skincare", "Skincare"),
            sub("haircare", "Haircare"),
            sub("hygiene", "Hygiene"),
            sub("cosmetics", "Cosmetics"),
        ],
    },
    TagDef {
        id: "health",
        icon: "medical-bag",
        label: "Health",
        color: "#A4E6B8",
        sub_tags: &[
            sub("medicine", "Medicine"),
            sub("vitamins", "Vitamins"),
            sub("first_aid", "First Aid"),
        ],
    },
    TagDef {
        id: "electronics",
        icon: "cellphone",
        label: "Electronics",
        color: "#E6D3A4",
        sub_tags: &[
            sub("devices", "Devices"),
            sub("cables", "Cables & Chargers"),
            sub("batteries", "Batteries"),
            sub("accessories", "Accessories"),
        ],
    },
    TagDef {
        id: "clothing",
        icon: "tshirt-crew-outline",
        label: "Clothing",
        color: "#E6B8A4",
        sub_tags: &[
            sub("tops", "Tops"),
            sub("bottoms", "Bottoms"),
            sub("shoes", "Shoes"),
            sub("outerwear", "Outerwear"),
        ],
    },
    TagDef {
        id: "pets",
        icon: "paw",
        label: "Pets",
        color: "#B8A48E",
        sub_tags: &[
            sub("pet_food", "Pet Food"),
            sub("pet_toys", "Toys"),
            sub("pet_care", "Pet Care"),
        ],
    },
    TagDef {
        id: "other",
        icon: "dots-horizontal",
        label: "Other",
        color: "#BDBDBD",
        sub_tags: &[],
    },
];

pub fn default_tag() -> &'static TagDef {
    &TAXONOMY[0]
}

pub fn find_tag(id: &str) -> Option<&'static TagDef> {
    TAXONOMY.iter().find(|tag| tag.id == id)
}

/// Exact label match, case-sensitive.
pub fn find_tag_by_label(label: &str) -> Option<&'static TagDef> {
    TAXONOMY.iter().find(|tag| tag.label == label)
}

/// Resolves a free-text label to a sub-tag id.
///
/// Case-insensitive exact match wins; otherwise the first candidate whose
/// label contains the input, or is contained by it. Blank input never matches.
pub fn match_sub_tag(label: &str, candidates: &[SubTagDef]) -> Option<&'static str> {
    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(found) = candidates
        .iter()
        .find(|candidate| candidate.label.to_lowercase() == needle)
    {
        return Some(found.id);
    }

    candidates
        .iter()
        .find(|candidate| {
            let hay = candidate.label.to_lowercase();
            hay.contains(&needle) || needle.contains(&hay)
        })
        .map(|found| found.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_ids_are_unique() {
        let mut ids: Vec<_> = TAXONOMY.iter().map(|tag| tag.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TAXONOMY.len());
    }

    #[test]
    fn default_tag_is_groceries() {
        assert_eq!(default_tag().id, "grocery");
        assert_eq!(default_tag().label, "Groceries");
    }

    #[test]
    fn sub_tag_exact_match_ignores_case() {
        let grocery = default_tag();
        assert_eq!(match_sub_tag("dAiRy", grocery.sub_tags), Some("dairy"));
    }

    #[test]
    fn sub_tag_falls_back_to_containment() {
        let grocery = default_tag();
        // "Frozen" is contained in "Frozen Foods"
        assert_eq!(match_sub_tag("frozen", grocery.sub_tags), Some("frozen"));
        // "Fresh Fruits" contains "Fruits"
        assert_eq!(match_sub_tag("Fresh Fruits", grocery.sub_tags), Some("fruits"));
    }

    #[test]
    fn sub_tag_without_match_is_none() {
        let grocery = default_tag();
        assert_eq!(match_sub_tag("Power tools", grocery.sub_tags), None);
        assert_eq!(match_sub_tag("   ", grocery.sub_tags), None);
        assert_eq!(match_sub_tag("Dairy", &[]), None);
    }

    #[test]
    fn label_lookup_is_exact() {
        assert_eq!(find_tag_by_label("Household").map(|t| t.id), Some("household"));
        assert!(find_tag_by_label("household").is_none());
    }
}
