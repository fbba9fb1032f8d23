//! Catalog domain: categories and promotions.
//!
//! Deterministic domain logic only (no IO, no HTTP, no storage). Records are
//! validated at construction; storage adapters persist them as-is.

pub mod category;
pub mod promotion;

pub use category::{Category, CategoryFields};
pub use promotion::{Promotion, PromotionFields, PromotionStatus};
