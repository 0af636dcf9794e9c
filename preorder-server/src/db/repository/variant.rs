//! Variant Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::Variant;

const VARIANT_TABLE: &str = "variant";

#[derive(Clone)]
pub struct VariantRepository {
    base: BaseRepository,
}

impl VariantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find variant by id, with its inventory graph
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Variant>> {
        let pure_id = id.strip_prefix("variant:").unwrap_or(id);
        let variant: Option<Variant> = self.base.db().select((VARIANT_TABLE, pure_id)).await?;
        Ok(variant)
    }
}
