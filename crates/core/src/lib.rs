//! `promodeck-core` — shared domain primitives.
//!
//! This crate contains **pure domain** building blocks (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod slug;

pub use error::{DomainError, DomainResult};
pub use id::{AdminId, CategoryId, PromotionId};
pub use slug::Slug;
