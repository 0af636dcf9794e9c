//! Cart Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::RecordId;

use crate::preorder::CartMetadata;

/// Cart record as stored by the host platform.
///
/// Everything except `metadata` is read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: RecordId,
    #[serde(default)]
    pub email: Option<String>,
    /// Creation time, RFC 3339. Immutable.
    pub created_at: String,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub metadata: Option<CartMetadata>,
}

impl Cart {
    /// Preorder predicate, delegated to the typed metadata bag
    pub fn is_preorder(&self) -> bool {
        self.metadata.as_ref().is_some_and(CartMetadata::is_preorder)
    }

    /// Effective submission time: `metadata.preorder_submitted_at` when it is
    /// a string, else `created_at`.
    pub fn submitted_at(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(CartMetadata::submitted_at)
            .unwrap_or(&self.created_at)
    }
}

/// Structured shipping address (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Cart line item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub metadata: Option<ItemMetadata>,
}

impl CartItem {
    /// Size annotation, only when stored as a string
    pub fn preorder_size(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.preorder_size.as_ref())
            .and_then(Value::as_str)
    }
}

/// Line item metadata bag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_size: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
