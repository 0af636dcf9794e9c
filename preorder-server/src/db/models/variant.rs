//! Product Variant Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product variant inventory configuration (read-only here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: RecordId,
    #[serde(default)]
    pub allow_backorder: bool,
    #[serde(default)]
    pub manage_inventory: bool,
    #[serde(default)]
    pub inventory_items: Vec<InventoryItemLink>,
}

/// Link from a variant to an inventory item.
///
/// `required_quantity` is the number of inventory units consumed per unit
/// sold; absent means 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemLink {
    #[serde(default)]
    pub required_quantity: Option<i64>,
    #[serde(default)]
    pub inventory: Option<InventoryRecord>,
}

/// Nested inventory record with per-location stock levels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(default)]
    pub location_levels: Vec<LocationLevel>,
}

/// Stock level at one location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationLevel {
    #[serde(default)]
    pub stocked_quantity: i64,
    #[serde(default)]
    pub reserved_quantity: i64,
}
