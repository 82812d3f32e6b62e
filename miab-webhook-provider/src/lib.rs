//! # miab-webhook-provider
//!
//! Client for the custom-DNS part of the [Mail-in-a-Box](https://mailinabox.email/)
//! admin API, used to publish and withdraw ACME DNS-01 TXT records.
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`DnsProvider::list_records`] | `GET /admin/dns/custom/{qname}/{rtype}` |
//! | [`DnsProvider::create_record`] | `POST /admin/dns/custom/{qname}/{rtype}` |
//! | [`DnsProvider::delete_record`] | `DELETE /admin/dns/custom/{qname}/{rtype}` |
//! | [`DnsProvider::update_dns`] | `POST /admin/dns/update` |
//! | [`DnsProvider::validate_credentials`] | `GET /admin/me` |
//!
//! Requests authenticate with HTTP basic auth (admin email + password).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for static / scratch container builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use miab_webhook_provider::{create_provider, DnsRecordType, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Miab {
//!         server: "box.example.org".to_string(),
//!         username: "admin@example.org".to_string(),
//!         password: "secret".to_string(),
//!     })?;
//!
//!     let name = "_acme-challenge.example.org";
//!     provider.create_record(name, DnsRecordType::Txt, "token").await?;
//!     provider.update_dns(false).await?;
//!
//!     for record in provider.list_records(name, DnsRecordType::Txt).await? {
//!         println!("{} {} {}", record.qname, record.rtype, record.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Read-only requests retry transient errors (`NetworkError`, `Timeout`,
//! `RateLimited`) with exponential backoff. Record changes and `update_dns` are
//! sent exactly once; a lost response surfaces as an error and is never replayed.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{CredentialValidationError, DnsRecord, DnsRecordType, ProviderCredentials};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete providers
pub use providers::{MiabProvider, MiabProviderBuilder};
