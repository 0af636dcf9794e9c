//! Preorder follow-up worker
//!
//! Consumes `cart.updated` events from the bus and sends a one-time
//! confirmation email for freshly submitted preorders. The sent flag is
//! written only after a successful send, so a failed send leaves the cart
//! eligible for retry on the next qualifying event.
//!
//! All operational failures are logged and swallowed; nothing awaits this
//! worker's result.

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use crate::core::events::CartEvent;
use crate::db::models::Cart;
use crate::db::repository::CartRepository;
use crate::services::Mailer;
use crate::utils::time::now_iso;

/// Should a confirmation email go out for this cart?
///
/// Submitted, not deleted, not yet notified, and an address to send to.
/// Reuses the one preorder predicate, so the notifier can never disagree
/// with the list view about what a preorder is.
pub fn followup_eligible(cart: &Cart) -> bool {
    let Some(metadata) = cart.metadata.as_ref() else {
        return false;
    };

    metadata.is_preorder()
        && !metadata.followup_sent()
        && cart.email.as_deref().is_some_and(|e| !e.is_empty())
}

/// Background worker bound to the cart event bus
pub struct FollowupWorker {
    carts: CartRepository,
    mailer: Arc<dyn Mailer>,
}

impl FollowupWorker {
    pub fn new(db: Surreal<Db>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            carts: CartRepository::new(db),
            mailer,
        }
    }

    /// 运行 worker（阻塞直到事件总线关闭）
    pub async fn run(self, mut events: broadcast::Receiver<CartEvent>) {
        tracing::info!("Preorder follow-up worker started");

        loop {
            match events.recv().await {
                Ok(CartEvent::Updated { cart_id }) => {
                    self.handle_cart_updated(&cart_id).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Missed events are re-evaluated on the next update for
                    // the same cart; the gate fields make that safe.
                    tracing::warn!(skipped = n, "Follow-up worker lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Cart event bus closed, follow-up worker stopping");
                    break;
                }
            }
        }
    }

    /// Evaluate one `cart.updated` event.
    ///
    /// No-op unless the cart is a submitted, non-deleted, not-yet-notified
    /// preorder with an email address.
    pub async fn handle_cart_updated(&self, cart_id: &str) {
        let cart = match self.carts.find_by_id(cart_id).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                tracing::debug!(cart_id = %cart_id, "Cart not found, skipping follow-up");
                return;
            }
            Err(e) => {
                tracing::warn!(cart_id = %cart_id, error = %e, "Failed to load cart for follow-up");
                return;
            }
        };

        if !followup_eligible(&cart) {
            return;
        }

        // Checked in followup_eligible
        let Some(email) = cart.email.as_deref() else {
            return;
        };

        if let Err(e) = self.mailer.send_followup(email).await {
            tracing::warn!(cart_id = %cart_id, error = %e, "Failed to send preorder follow-up email");
            return;
        }

        // Advance state only after a successful send. A failure here means
        // the next qualifying event retries the send; the provider-side
        // duplicate is preferable to never notifying.
        let mut metadata = cart.metadata.clone().unwrap_or_default();
        metadata.mark_followup_sent(now_iso());

        match self.carts.update_metadata(cart_id, metadata).await {
            Ok(Some(_)) => {
                tracing::info!(cart_id = %cart_id, "Preorder follow-up email sent");
            }
            Ok(None) => {
                tracing::warn!(cart_id = %cart_id, "Cart vanished while recording follow-up send");
            }
            Err(e) => {
                tracing::warn!(cart_id = %cart_id, error = %e, "Failed to record follow-up send");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use surrealdb::RecordId;

    fn cart(email: Option<&str>, metadata: Value) -> Cart {
        Cart {
            id: RecordId::from_table_key("cart", "c1"),
            email: email.map(str::to_string),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            shipping_address: None,
            items: vec![],
            metadata: serde_json::from_value(metadata).unwrap(),
        }
    }

    #[test]
    fn eligible_when_submitted_with_email() {
        let c = cart(Some("a@b.com"), json!({ "preorder_submitted": true }));
        assert!(followup_eligible(&c));

        // string encoding counts too
        let c = cart(Some("a@b.com"), json!({ "preorder_submitted": "true" }));
        assert!(followup_eligible(&c));
    }

    #[test]
    fn not_eligible_without_submission() {
        let c = cart(Some("a@b.com"), json!({}));
        assert!(!followup_eligible(&c));

        let c = cart(Some("a@b.com"), json!({ "preorder_submitted": false }));
        assert!(!followup_eligible(&c));
    }

    #[test]
    fn not_eligible_when_deleted() {
        let c = cart(
            Some("a@b.com"),
            json!({ "preorder_submitted": true, "preorder_deleted": "true" }),
        );
        assert!(!followup_eligible(&c));
    }

    #[test]
    fn not_eligible_when_already_sent() {
        let c = cart(
            Some("a@b.com"),
            json!({ "preorder_submitted": true, "preorder_followup_sent": true }),
        );
        assert!(!followup_eligible(&c));
    }

    #[test]
    fn not_eligible_without_email() {
        let c = cart(None, json!({ "preorder_submitted": true }));
        assert!(!followup_eligible(&c));

        let c = cart(Some(""), json!({ "preorder_submitted": true }));
        assert!(!followup_eligible(&c));
    }
}
