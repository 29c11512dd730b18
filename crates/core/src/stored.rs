//! Items kept in the server's in-memory store (full vs partial updates).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationResult;
use crate::item::check_description;
use crate::validate::{Rules, Validate};

pub const DEFAULT_TAX: f64 = 10.5;

fn default_tax() -> f64 {
    DEFAULT_TAX
}

/// Stored representation. A full replacement resets omitted fields to these
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_tax")]
    pub tax: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for StoredItem {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            price: None,
            tax: DEFAULT_TAX,
            tags: Vec::new(),
        }
    }
}

/// Partial update: `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tax: Option<f64>,
    pub tags: Option<Vec<String>>,
}

impl StoredItem {
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(tax) = patch.tax {
            self.tax = tax;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

fn check_price(rules: &mut Rules, price: Option<f64>) {
    if let Some(p) = price {
        rules.gt("price", p, 0.0);
    }
}

impl Validate for StoredItem {
    fn validate(&self) -> ValidationResult<()> {
        let mut rules = Rules::new();
        check_description(&mut rules, &self.description);
        check_price(&mut rules, self.price);
        rules.ge("tax", self.tax, 0.0);
        rules.finish()
    }
}

impl Validate for ItemPatch {
    fn validate(&self) -> ValidationResult<()> {
        let mut rules = Rules::new();
        check_description(&mut rules, &self.description);
        check_price(&mut rules, self.price);
        if let Some(tax) = self.tax {
            rules.ge("tax", tax, 0.0);
        }
        rules.finish()
    }
}

/// Initial store contents.
pub fn seed_items() -> BTreeMap<String, StoredItem> {
    let mut items = BTreeMap::new();
    items.insert(
        "foo".to_string(),
        StoredItem {
            name: Some("Foo".to_string()),
            price: Some(50.2),
            ..StoredItem::default()
        },
    );
    items.insert(
        "bar".to_string(),
        StoredItem {
            name: Some("Bar".to_string()),
            description: Some("The bartenders".to_string()),
            price: Some(62.0),
            tax: 20.2,
            tags: Vec::new(),
        },
    );
    items.insert(
        "baz".to_string(),
        StoredItem {
            name: Some("Baz".to_string()),
            description: None,
            price: Some(50.2),
            tax: 10.5,
            tags: Vec::new(),
        },
    );
    items
}
