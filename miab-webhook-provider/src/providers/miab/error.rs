//! Mail-in-a-Box error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{MiabProvider, PROVIDER_NAME};

/// The admin daemon answers with plain-text bodies and HTTP status codes only.
/// Reference: `management/daemon.py` (`dns_set_record`, `authorized_personnel_only`)
impl ProviderErrorMapper for MiabProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status {
            Some(401) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: non_empty(raw.message),
            },
            Some(403) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: non_empty(raw.message),
            },
            // 400: ValueError from the daemon, e.g. a qname outside every hosted zone
            Some(400) if is_unmanaged_domain(&raw.message) => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.qname.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            Some(400) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "value".to_string(),
                detail: raw.message,
            },
            _ => self.unknown_error(raw),
        }
    }
}

fn non_empty(message: String) -> Option<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_unmanaged_domain(message: &str) -> bool {
    message.contains("is not a domain name or a subdomain of a domain name managed by this box")
}
