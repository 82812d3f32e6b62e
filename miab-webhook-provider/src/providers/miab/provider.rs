//! Mail-in-a-Box `DnsProvider` trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, parse_record_type};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{DnsRecord, DnsRecordType};

use super::{MiabProvider, MiabRecord, PROVIDER_NAME};

impl MiabProvider {
    /// `/dns/custom/{qname}/{rtype}`
    fn custom_record_path(qname: &str, rtype: DnsRecordType) -> String {
        format!(
            "/dns/custom/{}/{}",
            urlencoding::encode(&normalize_domain_name(qname)),
            rtype.as_str()
        )
    }

    fn record_context(qname: &str) -> ErrorContext {
        ErrorContext {
            qname: Some(normalize_domain_name(qname)),
        }
    }

    /// 将 API 记录转换为 `DnsRecord`
    fn miab_record_to_dns_record(&self, record: MiabRecord) -> Result<DnsRecord> {
        Ok(DnsRecord {
            rtype: parse_record_type(&record.rtype, self.provider_name())?,
            qname: normalize_domain_name(&record.qname),
            value: record.value,
        })
    }
}

#[async_trait]
impl DnsProvider for MiabProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn validate_credentials(&self) -> Result<bool> {
        // `/me` answers 200 with `{"status": "ok" | "invalid", ...}`
        #[derive(serde::Deserialize)]
        struct MeResponse {
            status: String,
        }

        match self
            .get_json::<MeResponse>("/me", ErrorContext::default())
            .await
        {
            Ok(resp) => Ok(resp.status == "ok"),
            Err(
                ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. },
            ) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_records(&self, qname: &str, rtype: DnsRecordType) -> Result<Vec<DnsRecord>> {
        let path = Self::custom_record_path(qname, rtype);
        let records: Vec<MiabRecord> = self.get_json(&path, Self::record_context(qname)).await?;

        records
            .into_iter()
            .map(|r| self.miab_record_to_dns_record(r))
            .collect()
    }

    async fn create_record(&self, qname: &str, rtype: DnsRecordType, value: &str) -> Result<()> {
        let path = Self::custom_record_path(qname, rtype);
        let message = self
            .send_value(Method::POST, &path, value, Self::record_context(qname))
            .await?;
        log::info!(
            "[{PROVIDER_NAME}] Added {rtype} record for {}: {}",
            normalize_domain_name(qname),
            message.trim()
        );
        Ok(())
    }

    async fn delete_record(&self, qname: &str, rtype: DnsRecordType, value: &str) -> Result<()> {
        let path = Self::custom_record_path(qname, rtype);
        let message = self
            .send_value(Method::DELETE, &path, value, Self::record_context(qname))
            .await?;
        log::info!(
            "[{PROVIDER_NAME}] Removed {rtype} record for {}: {}",
            normalize_domain_name(qname),
            message.trim()
        );
        Ok(())
    }

    async fn update_dns(&self, force: bool) -> Result<()> {
        let force = if force { "1" } else { "0" };
        let message = self
            .send_form(
                Method::POST,
                "/dns/update",
                &[("force", force)],
                ErrorContext::default(),
            )
            .await?;
        log::debug!("[{PROVIDER_NAME}] DNS update: {}", message.trim());
        Ok(())
    }
}
