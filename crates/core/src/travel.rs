//! Travel items: a response that is one of two shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn car() -> String {
    "car".to_string()
}

fn plane() -> String {
    "plane".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default = "car")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlaneItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default = "plane")]
    pub kind: String,
    pub size: i64,
}

/// Plane is tried first: a car payload never carries `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TravelItem {
    Plane(PlaneItem),
    Car(CarItem),
}

pub fn lookup_travel_item(id: &str) -> Option<TravelItem> {
    match id {
        "item1" => Some(TravelItem::Car(CarItem {
            description: Some("All my friends drive a low rider".to_string()),
            kind: car(),
        })),
        "item2" => Some(TravelItem::Plane(PlaneItem {
            description: Some("Music is my aeroplane, it's my aeroplane".to_string()),
            kind: plane(),
            size: 5,
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_union_picks_shape_by_fields() {
        let v: TravelItem = serde_json::from_str(r#"{"size": 3}"#).unwrap();
        assert_eq!(
            v,
            TravelItem::Plane(PlaneItem { description: None, kind: plane(), size: 3 })
        );

        let v: TravelItem = serde_json::from_str(r#"{"description": "vroom"}"#).unwrap();
        assert!(matches!(v, TravelItem::Car(CarItem { ref kind, .. }) if kind == "car"));
    }

    #[test]
    fn catalog_serializes_flat() {
        let json = serde_json::to_value(lookup_travel_item("item2").unwrap()).unwrap();
        assert_eq!(json["type"], "plane");
        assert_eq!(json["size"], 5);
        assert!(lookup_travel_item("item3").is_none());
    }
}
