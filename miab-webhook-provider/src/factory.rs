//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::MiabProvider;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The server field is validated and normalized into an admin base URL here, so a
/// malformed address fails at construction instead of on the first request.
///
/// # Examples
///
/// ```rust,no_run
/// use miab_webhook_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Miab {
///     server: "box.example.org".to_string(),
///     username: "admin@example.org".to_string(),
///     password: "secret".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        ProviderCredentials::Miab {
            server,
            username,
            password,
        } => Ok(Arc::new(MiabProvider::new(&server, username, password)?)),
    }
}
