//! Preorder lifecycle
//!
//! A "preorder" is a cart the storefront flagged via metadata as an
//! early-commitment purchase. The lifecycle lives entirely in the cart's
//! metadata bag: submitted → (optionally notified) → (optionally
//! soft-deleted). This module holds the typed bag, the report, the CSV
//! export and the follow-up worker.

pub mod export;
pub mod flags;
pub mod followup;
pub mod report;

pub use export::export_preorders_csv;
pub use flags::{CartMetadata, Flag};
pub use followup::FollowupWorker;
pub use report::{PreorderPage, PreorderSummary, list_preorders};
