//! `firstshot-core`: request/response payload shapes.
//!
//! This crate contains **pure** payload types and their field rules (no HTTP,
//! no IO). Values are built per request and dropped after the response.

pub mod error;
pub mod item;
pub mod offer;
pub mod schedule;
pub mod stored;
pub mod travel;
pub mod user;
pub mod validate;

pub use error::{FieldError, Loc, ValidationErrors, ValidationResult};
pub use item::{Image, Item, featured_items};
pub use offer::{Offer, lookup_offer};
pub use schedule::{Schedule, ScheduleRequest};
pub use stored::{ItemPatch, StoredItem, seed_items};
pub use travel::{CarItem, PlaneItem, TravelItem, lookup_travel_item};
pub use user::{BaseUser, UserIn};
pub use validate::{Rules, Validate};
