use promodeck_router::Tenant;

/// Tenant context for a request.
///
/// Inserted by the routing middleware once a tenant has been resolved (from
/// the path prefix, possibly after a rewrite); immutable for the rest of the
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant: Tenant,
}

impl TenantContext {
    pub fn new(tenant: Tenant) -> Self {
        Self { tenant }
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }
}
