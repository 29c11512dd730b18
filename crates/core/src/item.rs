//! Catalog item payloads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationResult;
use crate::validate::{Rules, Validate};

/// Longest accepted item description.
pub const MAX_DESCRIPTION_LENGTH: usize = 300;

/// Description rule shared by every item shape.
pub(crate) fn check_description(rules: &mut Rules, description: &Option<String>) {
    if let Some(d) = description {
        rules.max_length("description", d, MAX_DESCRIPTION_LENGTH);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Image {
    #[schema(example = "https://example.com/baz.jpg")]
    pub url: String,
    pub name: String,
}

impl Validate for Image {
    fn validate(&self) -> ValidationResult<()> {
        Rules::new().http_url("url", &self.url).finish()
    }
}

/// An item for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// The description of the item
    #[serde(default)]
    #[schema(max_length = 300, example = "A very nice Item")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub name: String,
    /// The price must be greater than zero
    #[schema(example = 35.4)]
    pub price: f64,
    #[serde(default)]
    pub tax: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            description: None,
            kind: None,
            name: name.into(),
            price,
            tax: None,
            tags: None,
            images: None,
        }
    }
}

impl Validate for Item {
    fn validate(&self) -> ValidationResult<()> {
        let mut rules = Rules::new();
        check_description(&mut rules, &self.description);
        rules.gt("price", self.price, 0.0);
        if let Some(images) = &self.images {
            rules.nested("images", images);
        }
        rules.finish()
    }
}

/// The fixed pair returned by the item lookup walkthrough.
pub fn featured_items() -> Vec<Item> {
    vec![Item::new("Portal Gun", 42.0), Item::new("Plumbus", 32.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tags_deduplicate_and_sort() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "name": "Foo",
            "price": 1.5,
            "tags": ["rock", "metal", "rock"],
        }))
        .unwrap();

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["tags"], serde_json::json!(["metal", "rock"]));
        assert!(out["type"].is_null());
    }

    #[test]
    fn nested_image_errors_carry_their_index() {
        let mut item = Item::new("Foo", 1.0);
        item.images = Some(vec![
            Image { url: "https://example.com/a.png".into(), name: "a".into() },
            Image { url: "nope".into(), name: "b".into() },
        ]);

        let err = item.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(
            serde_json::to_value(&err.errors()[0].loc).unwrap(),
            serde_json::json!(["images", 1, "url"])
        );
    }

    #[test]
    fn featured_items_are_valid() {
        for item in featured_items() {
            item.validate().unwrap();
        }
    }

    proptest! {
        #[test]
        fn price_rule_matches_sign(price in -1000.0f64..1000.0) {
            let item = Item::new("Foo", price);
            prop_assert_eq!(item.validate().is_ok(), price > 0.0);
        }

        #[test]
        fn description_rule_matches_length(len in 0usize..400) {
            let mut item = Item::new("Foo", 1.0);
            item.description = Some("d".repeat(len));
            prop_assert_eq!(item.validate().is_ok(), len <= MAX_DESCRIPTION_LENGTH);
        }
    }
}
