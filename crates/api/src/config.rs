//! Environment-provided application configuration.

use chrono::Duration;

use promodeck_router::{Environment, RouterConfig, Tenant};

/// Everything the binary reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub router: RouterConfig,
    pub bind_addr: String,
    pub session_ttl: Duration,
    pub use_persistent_store: bool,
    pub database_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            bind_addr: "0.0.0.0:8080".to_string(),
            session_ttl: Duration::hours(8),
            use_persistent_store: false,
            database_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup. Split out from [`from_env`] so
    /// tests can feed values without touching process environment.
    ///
    /// Recognized keys: `APP_ENV`, `DEFAULT_TENANT`, `TENANTS` (comma list),
    /// `ADMIN_PREFIX`, `TENANT_HOSTS` (`host=tenant` comma list),
    /// `BIND_ADDR`, `SESSION_TTL_HOURS`, `USE_PERSISTENT_STORES`,
    /// `DATABASE_URL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(env) = lookup("APP_ENV") {
            config.router.environment = match env.as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            };
        }
        if let Some(tenant) = lookup("DEFAULT_TENANT") {
            config.router.default_tenant = Tenant::new(tenant);
        }
        if let Some(tenants) = lookup("TENANTS") {
            let parsed: Vec<Tenant> = tenants
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Tenant::new)
                .collect();
            if !parsed.is_empty() {
                config.router.tenants = parsed;
            }
        }
        if let Some(prefix) = lookup("ADMIN_PREFIX") {
            config.router.admin_prefix = prefix;
        }
        if let Some(hosts) = lookup("TENANT_HOSTS") {
            config.router.hosts = hosts
                .split(',')
                .filter_map(|pair| pair.trim().split_once('='))
                .map(|(host, tenant)| (host.trim().to_string(), Tenant::new(tenant.trim())))
                .collect();
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(hours) = lookup("SESSION_TTL_HOURS") {
            match hours.parse::<i64>() {
                Ok(h) if h > 0 => config.session_ttl = Duration::hours(h),
                _ => tracing::warn!(value = %hours, "ignoring invalid SESSION_TTL_HOURS"),
            }
        }
        if let Some(flag) = lookup("USE_PERSISTENT_STORES") {
            config.use_persistent_store = flag.parse::<bool>().unwrap_or(false);
        }
        config.database_url = lookup("DATABASE_URL");

        config
    }
}
