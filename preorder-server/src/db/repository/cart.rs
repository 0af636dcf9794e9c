//! Cart Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Cart;
use crate::preorder::CartMetadata;

const CART_TABLE: &str = "cart";

/// Strip the "cart:" prefix so both "cart:abc" and "abc" resolve
fn strip_table_prefix(id: &str) -> &str {
    id.strip_prefix("cart:").unwrap_or(id)
}

/// Metadata-only merge payload for cart updates
#[derive(Debug, Serialize)]
struct MetadataPatch {
    metadata: CartMetadata,
}

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fetch the full cart table.
    ///
    /// The preorder report filters and sorts in memory, so the candidate set
    /// is the whole table (bounded by the shop's cart count).
    pub async fn find_all(&self) -> RepoResult<Vec<Cart>> {
        let carts: Vec<Cart> = self.base.db().select(CART_TABLE).await?;
        Ok(carts)
    }

    /// Find cart by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Cart>> {
        let pure_id = strip_table_prefix(id);
        let cart: Option<Cart> = self.base.db().select((CART_TABLE, pure_id)).await?;
        Ok(cart)
    }

    /// Replace the cart's metadata bag with a merged one.
    ///
    /// Blind last-write-wins merge; concurrent writers race at the bag level,
    /// which is accepted for these operator-facing flows.
    pub async fn update_metadata(
        &self,
        id: &str,
        metadata: CartMetadata,
    ) -> RepoResult<Option<Cart>> {
        let pure_id = strip_table_prefix(id);
        let cart: Option<Cart> = self
            .base
            .db()
            .update((CART_TABLE, pure_id))
            .merge(MetadataPatch { metadata })
            .await?;
        Ok(cart)
    }

    /// Soft-delete a preorder: flag + timestamp merged into existing
    /// metadata. The cart record itself is untouched.
    ///
    /// Idempotent; a repeat call refreshes the timestamp.
    pub async fn soft_delete_preorder(&self, id: &str, now_iso: String) -> RepoResult<Cart> {
        let cart = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Preorder {} not found", id)))?;

        let mut metadata = cart.metadata.clone().unwrap_or_default();
        metadata.mark_deleted(now_iso);

        self.update_metadata(id, metadata)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Preorder {} not found", id)))
    }
}
