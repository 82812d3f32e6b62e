//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use miab_webhook_provider::{DnsProvider, DnsRecordType, ProviderCredentials, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成唯一的测试记录名称（位于测试域名之下）
pub fn generate_test_record_name(domain: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{domain}", &uuid.to_string()[..8])
}

/// 生成唯一的 TXT 值
pub fn generate_test_value() -> String {
    format!("integration-{}", uuid::Uuid::new_v4())
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建测试上下文
    pub fn from_env() -> Option<Self> {
        let server = env::var("MIAB_SERVER").ok()?;
        let username = env::var("MIAB_USERNAME").ok()?;
        let password = env::var("MIAB_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let provider = create_provider(ProviderCredentials::Miab {
            server,
            username,
            password,
        })
        .ok()?;

        Some(Self { provider, domain })
    }

    /// 是否存在完全匹配的 TXT 记录
    pub async fn has_txt(&self, qname: &str, value: &str) -> bool {
        self.provider
            .list_records(qname, DnsRecordType::Txt)
            .await
            .map(|records| records.iter().any(|r| r.matches(qname, value)))
            .unwrap_or(false)
    }

    /// 清理测试记录
    pub async fn cleanup_txt(&self, qname: &str, value: &str) {
        let _ = self
            .provider
            .delete_record(qname, DnsRecordType::Txt, value)
            .await;
    }
}
