//! Cart event bus
//!
//! In-process distribution of `cart.updated` events:
//!
//! ```text
//! POST /hooks/cart-updated ──┐
//! DELETE /admin/preorders/:id ──┤ publish
//!                               ▼
//!                        CartEventBus (broadcast)
//!                               │
//!                               └──► FollowupWorker
//! ```
//!
//! Subscribers evaluate the cart's metadata from scratch on every event, so
//! dropped or duplicated deliveries are safe: the gate fields decide, not the
//! event stream.

use tokio::sync::broadcast;

/// Default bus capacity before slow subscribers start lagging
const DEFAULT_CAPACITY: usize = 256;

/// Event carried on the bus
#[derive(Debug, Clone)]
pub enum CartEvent {
    /// The host platform updated a cart (id in "cart:key" or "key" form)
    Updated { cart_id: String },
}

/// Broadcast bus for cart events
#[derive(Debug, Clone)]
pub struct CartEventBus {
    tx: broadcast::Sender<CartEvent>,
}

impl CartEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Fine with zero subscribers (worker disabled).
    pub fn publish(&self, event: CartEvent) {
        let _ = self.tx.send(event);
    }

    /// New subscription receiving events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }
}

impl Default for CartEventBus {
    fn default() -> Self {
        Self::new()
    }
}
