//! Variant sellability
//!
//! Classifies a product variant as purchasable and/or a preorder from its
//! inventory configuration:
//!
//! - unmanaged inventory → always sellable, never a preorder
//! - managed + backorder allowed → sellable as a preorder
//! - managed + no backorder → sellable iff net available units > 0

use serde::{Deserialize, Serialize};

use crate::db::models::{InventoryItemLink, Variant};

/// Evaluation result for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sellability {
    pub sellable: bool,
    pub preorder: bool,
}

/// Units available through one inventory-item link: net stock across all
/// locations divided by the per-unit requirement, floored. A non-positive
/// requirement yields zero.
fn link_units(link: &InventoryItemLink) -> i64 {
    let required = link.required_quantity.unwrap_or(1);
    if required <= 0 {
        return 0;
    }

    let net: i64 = link
        .inventory
        .as_ref()
        .map(|inv| {
            inv.location_levels
                .iter()
                .map(|level| (level.stocked_quantity - level.reserved_quantity).max(0))
                .sum()
        })
        .unwrap_or(0);

    net / required
}

/// Available units for the variant: the minimum over all inventory-item
/// links. A variant with no links has nothing to draw from.
fn available_units(links: &[InventoryItemLink]) -> Option<i64> {
    links.iter().map(link_units).min()
}

/// Evaluate sellability per the variant's inventory configuration
pub fn evaluate(variant: &Variant) -> Sellability {
    if !variant.manage_inventory {
        return Sellability {
            sellable: true,
            preorder: false,
        };
    }

    if variant.allow_backorder {
        return Sellability {
            sellable: true,
            preorder: true,
        };
    }

    let sellable = available_units(&variant.inventory_items).is_some_and(|units| units > 0);
    Sellability {
        sellable,
        preorder: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{InventoryRecord, LocationLevel};
    use surrealdb::RecordId;

    fn variant(
        manage_inventory: bool,
        allow_backorder: bool,
        links: Vec<InventoryItemLink>,
    ) -> Variant {
        Variant {
            id: RecordId::from_table_key("variant", "v1"),
            allow_backorder,
            manage_inventory,
            inventory_items: links,
        }
    }

    fn link(required: Option<i64>, levels: Vec<(i64, i64)>) -> InventoryItemLink {
        InventoryItemLink {
            required_quantity: required,
            inventory: Some(InventoryRecord {
                location_levels: levels
                    .into_iter()
                    .map(|(stocked, reserved)| LocationLevel {
                        stocked_quantity: stocked,
                        reserved_quantity: reserved,
                    })
                    .collect(),
            }),
        }
    }

    #[test]
    fn unmanaged_inventory_is_always_sellable() {
        let v = variant(false, false, vec![]);
        assert_eq!(
            evaluate(&v),
            Sellability {
                sellable: true,
                preorder: false
            }
        );
    }

    #[test]
    fn backorder_makes_it_a_preorder() {
        let v = variant(true, true, vec![link(Some(1), vec![(0, 0)])]);
        assert_eq!(
            evaluate(&v),
            Sellability {
                sellable: true,
                preorder: true
            }
        );
    }

    #[test]
    fn managed_stock_divides_by_required_quantity() {
        // floor((10 - 7) / 2) = 1
        let v = variant(true, false, vec![link(Some(2), vec![(10, 7)])]);
        assert_eq!(
            evaluate(&v),
            Sellability {
                sellable: true,
                preorder: false
            }
        );
    }

    #[test]
    fn fully_reserved_stock_is_not_sellable() {
        let v = variant(true, false, vec![link(Some(1), vec![(5, 5)])]);
        assert_eq!(
            evaluate(&v),
            Sellability {
                sellable: false,
                preorder: false
            }
        );
    }

    #[test]
    fn oversold_locations_clamp_to_zero() {
        // one location oversold, one with stock: 0 + 3 = 3 net
        let v = variant(true, false, vec![link(Some(1), vec![(2, 9), (3, 0)])]);
        assert_eq!(
            evaluate(&v),
            Sellability {
                sellable: true,
                preorder: false
            }
        );
    }

    #[test]
    fn scarcest_link_bounds_availability() {
        let v = variant(
            true,
            false,
            vec![
                link(Some(1), vec![(10, 0)]),
                link(Some(1), vec![(0, 0)]), // out of stock
            ],
        );
        assert!(!evaluate(&v).sellable);
    }

    #[test]
    fn no_links_means_not_sellable() {
        let v = variant(true, false, vec![]);
        assert!(!evaluate(&v).sellable);
    }

    #[test]
    fn non_positive_required_quantity_is_zero_available() {
        let v = variant(true, false, vec![link(Some(0), vec![(10, 0)])]);
        assert!(!evaluate(&v).sellable);

        let v = variant(true, false, vec![link(Some(-2), vec![(10, 0)])]);
        assert!(!evaluate(&v).sellable);
    }

    #[test]
    fn absent_required_quantity_defaults_to_one() {
        let v = variant(true, false, vec![link(None, vec![(1, 0)])]);
        assert!(evaluate(&v).sellable);
    }
}
