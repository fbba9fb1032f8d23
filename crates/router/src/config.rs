//! Routing configuration.

use serde::{Deserialize, Serialize};

use crate::tenant::Tenant;

/// Deployment environment the router is running in.
///
/// Development ignores hostnames entirely; production may consult the
/// hostname→tenant map before falling back to the default tenant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// Static configuration for the tenant router.
///
/// Built once at startup (typically from environment variables) and shared
/// read-only across all requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub environment: Environment,

    /// Path prefix gating the management dashboard, e.g. `/admin`.
    pub admin_prefix: String,

    /// Tenant used when neither the path nor the hostname resolves one.
    pub default_tenant: Tenant,

    /// Recognized tenants; their path prefixes are never rewritten again.
    pub tenants: Vec<Tenant>,

    /// Hostname→tenant mapping consulted in production. Empty by default: the
    /// original deployment launched with every host falling back to
    /// `default_tenant`, and we preserve that until hosts are configured.
    pub hosts: Vec<(String, Tenant)>,

    /// Path prefixes the router never touches (API routes, static assets).
    pub exempt_prefixes: Vec<String>,
}

impl RouterConfig {
    /// The path the router redirects unauthenticated admin traffic to.
    pub fn login_path(&self) -> String {
        format!("{}/login", self.admin_prefix)
    }

    /// The registration path, exempt from the session check like login.
    pub fn register_path(&self) -> String {
        format!("{}/register", self.admin_prefix)
    }

    /// Resolve a tenant from a hostname, tolerating a `www.` prefix and an
    /// attached port.
    pub fn tenant_for_host(&self, host: &str) -> Option<&Tenant> {
        let host = host.split(':').next().unwrap_or(host);
        let bare = host.strip_prefix("www.").unwrap_or(host);
        self.hosts
            .iter()
            .find(|(h, _)| h == host || h == bare)
            .map(|(_, t)| t)
    }

    /// The tenant whose path prefix the given path already carries, if any.
    pub fn tenant_for_path<'a>(&'a self, path: &str) -> Option<&'a Tenant> {
        self.tenants
            .iter()
            .find(|t| path.starts_with(&t.path_prefix()))
    }
}

impl Default for RouterConfig {
    /// Mirrors the shipped deployment: `site-a`/`site-b` storefronts,
    /// `/admin` dashboard, everything else rewritten onto `site-a`.
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            admin_prefix: "/admin".to_string(),
            default_tenant: Tenant::new("site-a"),
            tenants: vec![Tenant::new("site-a"), Tenant::new("site-b")],
            hosts: Vec::new(),
            exempt_prefixes: vec!["/api".to_string(), "/health".to_string(), "/favicon.ico".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_lookup_ignores_www_and_port() {
        let config = RouterConfig {
            hosts: vec![("site-b.com".to_string(), Tenant::new("site-b"))],
            ..RouterConfig::default()
        };
        for host in ["site-b.com", "www.site-b.com", "site-b.com:8443"] {
            assert_eq!(
                config.tenant_for_host(host).map(Tenant::as_str),
                Some("site-b"),
                "{host}"
            );
        }
        assert!(config.tenant_for_host("other.com").is_none());
    }

    #[test]
    fn path_lookup_matches_known_prefixes_only() {
        let config = RouterConfig::default();
        assert_eq!(
            config.tenant_for_path("/site-b/promotions").map(Tenant::as_str),
            Some("site-b")
        );
        assert!(config.tenant_for_path("/blog/site-a").is_none());
    }
}
