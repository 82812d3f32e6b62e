//! 类型定义模块

mod challenge;
mod credentials;

pub use challenge::{ChallengeAction, ChallengeRequest};
pub use credentials::{MiabCredentials, SecretData};

// Re-export provider 库的公共类型
pub use miab_webhook_provider::{DnsRecord, DnsRecordType, ProviderCredentials};
