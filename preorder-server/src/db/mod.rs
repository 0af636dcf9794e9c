//! Database layer
//!
//! Embedded SurrealDB storage: models and repositories.

pub mod models;
pub mod repository;
