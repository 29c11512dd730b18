use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationResult;
use crate::item::Item;
use crate::validate::{Rules, Validate};

/// A bundle of items sold together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub items: Vec<Item>,
}

impl Validate for Offer {
    fn validate(&self) -> ValidationResult<()> {
        Rules::new().nested("items", &self.items).finish()
    }
}

pub fn lookup_offer(id: &str) -> Option<Offer> {
    match id {
        "foo" => Some(Offer {
            name: "The Foo Wrestlers".to_string(),
            description: None,
            price: 50.0,
            items: vec![Item::new("Foo", 25.0), Item::new("Wrestler", 25.0)],
        }),
        _ => None,
    }
}
