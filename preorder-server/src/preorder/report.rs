//! Preorder report
//!
//! Filters the cart table down to active preorders, sorts them newest-first
//! by effective submission time and pages the result. The same filter+sort
//! feeds the list endpoint (paginated) and the CSV export (full set).

use serde::{Deserialize, Serialize};

use crate::db::models::{Cart, CartItem, ShippingAddress};
use crate::preorder::CartMetadata;
use crate::utils::time::parse_millis;

/// 默认分页大小
pub const DEFAULT_LIMIT: i64 = 50;
/// 单页上限
pub const MAX_LIMIT: i64 = 200;

/// One page of the preorder report
#[derive(Debug, Serialize, Deserialize)]
pub struct PreorderPage {
    pub preorders: Vec<PreorderSummary>,
    /// Total active preorders before pagination
    pub count: i64,
    /// Effective offset actually applied
    pub offset: i64,
    /// Effective limit actually applied
    pub limit: i64,
}

/// API view of a preorder cart (string id, precomputed submission time)
#[derive(Debug, Serialize, Deserialize)]
pub struct PreorderSummary {
    pub id: String,
    pub email: Option<String>,
    pub created_at: String,
    /// Effective submission time used for ordering
    pub submitted_at: String,
    pub shipping_address: Option<ShippingAddress>,
    pub items: Vec<CartItem>,
    pub metadata: Option<CartMetadata>,
}

impl From<Cart> for PreorderSummary {
    fn from(cart: Cart) -> Self {
        let submitted_at = cart.submitted_at().to_string();
        Self {
            id: cart.id.to_string(),
            email: cart.email,
            created_at: cart.created_at,
            submitted_at,
            shipping_address: cart.shipping_address,
            items: cart.items,
            metadata: cart.metadata,
        }
    }
}

/// Filter to active preorders and sort descending by effective submission
/// time. Ties fall back to `created_at`, then to the record id, so paging is
/// stable across requests.
pub fn filter_and_sort(carts: Vec<Cart>) -> Vec<Cart> {
    let mut preorders: Vec<Cart> = carts.into_iter().filter(Cart::is_preorder).collect();

    preorders.sort_by(|a, b| {
        let a_submitted = parse_millis(a.submitted_at());
        let b_submitted = parse_millis(b.submitted_at());

        b_submitted
            .cmp(&a_submitted)
            .then_with(|| parse_millis(&b.created_at).cmp(&parse_millis(&a.created_at)))
            .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
    });

    preorders
}

/// Build one page of the report.
///
/// `limit` clamps to `[1, MAX_LIMIT]`, `offset` to `>= 0`; `count` is the
/// pre-pagination total.
pub fn list_preorders(carts: Vec<Cart>, limit: i64, offset: i64) -> PreorderPage {
    let limit = limit.clamp(1, MAX_LIMIT);
    let offset = offset.max(0);

    let preorders = filter_and_sort(carts);
    let count = preorders.len() as i64;

    let page = preorders
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(PreorderSummary::from)
        .collect();

    PreorderPage {
        preorders: page,
        count,
        offset,
        limit,
    }
}
