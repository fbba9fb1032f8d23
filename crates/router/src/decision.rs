//! The routing decision function.

use crate::config::{Environment, RouterConfig};
use crate::tenant::Tenant;

/// The facts about one incoming request the router is allowed to see.
///
/// Session verification itself is delegated to an external identity provider;
/// the router only receives presence/absence.
#[derive(Debug, Clone, Copy)]
pub struct RequestFacts<'a> {
    pub path: &'a str,
    pub host: Option<&'a str>,
    pub session_present: bool,
}

/// The single outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Forward the request unchanged.
    Pass,

    /// Serve a tenant-scoped internal path for the same external URL,
    /// invisible to the client.
    RewriteToTenant { tenant: Tenant, path: String },

    /// Send the client to the admin login page (HTTP 3xx).
    RedirectToLogin,
}

/// Decide how to route one request.
///
/// Total over its input domain: every `(config, facts)` pair yields exactly
/// one decision, with no side effects and no retained state.
///
/// Idempotence: rewriting prepends a recognized tenant prefix, and prefixed
/// paths always pass, so routing a rewritten path again yields
/// [`RouteDecision::Pass`].
pub fn route(config: &RouterConfig, facts: &RequestFacts<'_>) -> RouteDecision {
    // API routes, health, static assets: never rewritten or gated here.
    if config
        .exempt_prefixes
        .iter()
        .any(|p| facts.path.starts_with(p.as_str()))
    {
        return RouteDecision::Pass;
    }

    // Admin surface: session-gated except for the login/register entry points.
    if facts.path.starts_with(&config.admin_prefix) {
        let open = facts.path.starts_with(&config.login_path())
            || facts.path.starts_with(&config.register_path());
        if !open && !facts.session_present {
            return RouteDecision::RedirectToLogin;
        }
        return RouteDecision::Pass;
    }

    // Storefront surface: already tenant-scoped paths pass untouched.
    if config.tenant_for_path(facts.path).is_some() {
        return RouteDecision::Pass;
    }

    // Otherwise resolve a tenant. In production a configured hostname wins;
    // everything else lands on the default tenant.
    let tenant = match (config.environment, facts.host) {
        (Environment::Production, Some(host)) => config
            .tenant_for_host(host)
            .unwrap_or(&config.default_tenant),
        _ => &config.default_tenant,
    };

    RouteDecision::RewriteToTenant {
        tenant: tenant.clone(),
        path: format!("{}{}", tenant.path_prefix(), facts.path),
    }
}
