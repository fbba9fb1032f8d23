//! Admin accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promodeck_core::{AdminId, DomainError, DomainResult};

/// An admin dashboard account.
///
/// Credentials are not stored on the record; they live with whatever identity
/// provider the deployment wires in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminId,
    pub email: String,
    /// Defaults to the local part of the email at registration time.
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    /// Register a new account. The display name defaults to the email's local
    /// part, matching the original registration endpoint.
    pub fn register(
        id: AdminId,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let email = email.into();
        let local = validate_email(&email)?;
        Ok(Self {
            id,
            display_name: local.to_string(),
            email,
            created_at: now,
        })
    }
}

/// Minimal structural email check: one `@` with non-empty local part and a
/// domain containing a dot.
fn validate_email(email: &str) -> DomainResult<&str> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| DomainError::validation("email must contain '@'"))?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(DomainError::validation(format!("malformed email: {email:?}")));
    }
    Ok(local)
}

/// Password policy applied at registration.
pub fn check_password_policy(password: &str) -> DomainResult<()> {
    if password.chars().count() < 8 {
        return Err(DomainError::validation(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_derives_display_name_from_email() {
        let account =
            AdminAccount::register(AdminId::new(), "ops@site-a.com", Utc::now()).unwrap();
        assert_eq!(account.display_name, "ops");
        assert_eq!(account.email, "ops@site-a.com");
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "nope", "@site-a.com", "ops@", "ops@localhost", "a b@c.com"] {
            assert!(
                AdminAccount::register(AdminId::new(), bad, Utc::now()).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn password_policy_enforces_minimum_length() {
        assert!(check_password_policy("hunter2").is_err());
        assert!(check_password_policy("hunter2!").is_ok());
    }
}
