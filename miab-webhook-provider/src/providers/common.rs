//! Provider 公共工具函数

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::{ProviderError, Result};
use crate::types::DnsRecordType;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 记录类型转换 ============

/// 将字符串转换为 `DnsRecordType`
pub fn parse_record_type(record_type: &str, provider: &str) -> Result<DnsRecordType> {
    match record_type.to_uppercase().as_str() {
        "A" => Ok(DnsRecordType::A),
        "AAAA" => Ok(DnsRecordType::Aaaa),
        "CNAME" => Ok(DnsRecordType::Cname),
        "MX" => Ok(DnsRecordType::Mx),
        "TXT" => Ok(DnsRecordType::Txt),
        "NS" => Ok(DnsRecordType::Ns),
        "SRV" => Ok(DnsRecordType::Srv),
        "CAA" => Ok(DnsRecordType::Caa),
        _ => Err(ProviderError::UnsupportedRecordType {
            provider: provider.to_string(),
            record_type: record_type.to_string(),
        }),
    }
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 由服务器地址推导管理 API 根地址
///
/// 如: `box.example.org` -> `https://box.example.org/admin`
/// 如: `http://10.0.0.5:8080` -> `http://10.0.0.5:8080/admin`
/// 如: `https://box.example.org/custom/admin/` -> `https://box.example.org/custom/admin`
pub fn admin_base_url(server: &str, provider: &str) -> Result<String> {
    let invalid = |detail: String| ProviderError::InvalidParameter {
        provider: provider.to_string(),
        param: "server".to_string(),
        detail,
    };

    let trimmed = server.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(invalid("server address is empty".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| invalid(format!("{with_scheme}: {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("{with_scheme}: missing host")));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.path().trim_matches('/').is_empty() {
        url.set_path("/admin");
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_record_types() {
        assert_eq!(parse_record_type("txt", "miab").unwrap(), DnsRecordType::Txt);
        assert_eq!(
            parse_record_type("AAAA", "miab").unwrap(),
            DnsRecordType::Aaaa
        );
    }

    #[test]
    fn parse_unknown_record_type() {
        let err = parse_record_type("SSHFP", "miab").unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedRecordType { .. }));
    }

    #[test]
    fn normalize_strips_trailing_dot() {
        assert_eq!(
            normalize_domain_name("_acme-challenge.example.org."),
            "_acme-challenge.example.org"
        );
        assert_eq!(normalize_domain_name("example.org"), "example.org");
    }

    #[test]
    fn base_url_from_bare_host() {
        assert_eq!(
            admin_base_url("box.example.org", "miab").unwrap(),
            "https://box.example.org/admin"
        );
    }

    #[test]
    fn base_url_keeps_scheme_and_port() {
        assert_eq!(
            admin_base_url("http://10.0.0.5:8080/", "miab").unwrap(),
            "http://10.0.0.5:8080/admin"
        );
    }

    #[test]
    fn base_url_keeps_explicit_path() {
        assert_eq!(
            admin_base_url("https://box.example.org/custom/admin/", "miab").unwrap(),
            "https://box.example.org/custom/admin"
        );
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(admin_base_url("", "miab").is_err());
        assert!(admin_base_url("not a host", "miab").is_err());
        assert!(admin_base_url("ftp://box.example.org", "miab").is_err());
    }
}
