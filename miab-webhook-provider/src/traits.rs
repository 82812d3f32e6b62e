use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, DnsRecordType};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: Option<u16>,
    /// 原始错误消息（响应体）
    pub message: String,
}

impl RawApiError {
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `DomainNotFound` 等错误）
    pub qname: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.status.map(|s| s.to_string()),
            raw_message: raw.message,
        }
    }
}

/// DNS 提供商 Trait
///
/// Records are addressed by name, type and value; there are no record IDs.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 获取指定名称和类型的自定义记录
    async fn list_records(&self, qname: &str, rtype: DnsRecordType) -> Result<Vec<DnsRecord>>;

    /// 添加一条记录（同名同类型的其他记录保持不变）
    async fn create_record(&self, qname: &str, rtype: DnsRecordType, value: &str) -> Result<()>;

    /// 删除值完全匹配的那一条记录
    async fn delete_record(&self, qname: &str, rtype: DnsRecordType, value: &str) -> Result<()>;

    /// 触发 DNS 配置重新生成并发布
    ///
    /// `force` 为 `true` 时即使区域未变化也重新签名、重新加载。
    async fn update_dns(&self, force: bool) -> Result<()>;
}
