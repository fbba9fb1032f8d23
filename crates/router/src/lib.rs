//! `promodeck-router` — tenant resolution and routing decisions.
//!
//! This crate is the multi-tenant heart of the deployment: given the facts of
//! one incoming request (path, hostname, session presence) it produces exactly
//! one [`RouteDecision`]. The function is pure and total; it never fails,
//! blocks, or keeps state between invocations, so callers may evaluate it
//! concurrently without coordination.
//!
//! Transport wiring (actually rewriting a URI or emitting a 3xx) lives in the
//! API crate; this crate only decides.

pub mod config;
pub mod decision;
pub mod tenant;

pub use config::{Environment, RouterConfig};
pub use decision::{route, RequestFacts, RouteDecision};
pub use tenant::Tenant;
