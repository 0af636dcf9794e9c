//! Database models
//!
//! Documents owned by the host platform; this service reads carts and
//! variants and only ever writes the cart `metadata` bag.

mod cart;
mod variant;

pub use cart::{Cart, CartItem, ItemMetadata, ShippingAddress};
pub use variant::{InventoryItemLink, InventoryRecord, LocationLevel, Variant};
