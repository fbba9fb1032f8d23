//! `promodeck-auth` — admin identity and session boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Credential
//! verification and session persistence live behind the store layer (or an
//! external identity provider in production); here we only model accounts,
//! opaque session tokens, and deterministic validity checks.

pub mod admin;
pub mod session;

pub use admin::{check_password_policy, AdminAccount};
pub use session::{validate_session, Session, SessionError, SessionToken};
