//! Provider 会话工厂 Trait

use std::sync::Arc;

use miab_webhook_provider::{
    create_provider, DnsProvider, ProviderCredentials, Result as ProviderResult,
};

/// Builds a provider session from credentials.
///
/// Called at most once per solver, the first time a request needs the provider.
pub trait SessionFactory: Send + Sync {
    fn create_session(
        &self,
        credentials: ProviderCredentials,
    ) -> ProviderResult<Arc<dyn DnsProvider>>;
}

/// Default factory backed by the Mail-in-a-Box HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiabSessionFactory;

impl SessionFactory for MiabSessionFactory {
    fn create_session(
        &self,
        credentials: ProviderCredentials,
    ) -> ProviderResult<Arc<dyn DnsProvider>> {
        create_provider(credentials)
    }
}
