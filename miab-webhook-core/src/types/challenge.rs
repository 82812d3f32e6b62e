//! Challenge 请求类型

use serde::{Deserialize, Serialize};

/// One present/clean-up call from the certificate orchestrator.
///
/// Field names follow the orchestrator's JSON. Every field is optional on the wire;
/// an empty `action` or `type` is accepted by both operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Correlates repeated calls for the same logical challenge.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "type")]
    pub challenge_type: String,
    #[serde(default)]
    pub dns_name: String,
    /// TXT value to publish.
    #[serde(default)]
    pub key: String,
    /// Record name, usually with a trailing dot.
    #[serde(default, rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    #[serde(default)]
    pub resolved_zone: String,
    #[serde(default)]
    pub resource_namespace: String,
    /// Raw per-request solver config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    /// TXT record name as sent to the provider (trailing dot stripped).
    pub fn record_name(&self) -> &str {
        self.resolved_fqdn.trim_end_matches('.')
    }

    /// Whether the challenge type can be solved here (`dns-01`, or unspecified).
    pub fn is_dns01(&self) -> bool {
        self.challenge_type.is_empty()
            || self.challenge_type.eq_ignore_ascii_case("dns-01")
            || self.challenge_type.eq_ignore_ascii_case("dns01")
    }
}

/// The two operations a request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeAction {
    Present,
    CleanUp,
}

impl ChallengeAction {
    /// 用于日志和错误信息
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::CleanUp => "cleanup",
        }
    }

    /// Whether a request's `action` field is compatible with this operation.
    pub fn accepts(self, action: &str) -> bool {
        if action.is_empty() {
            return true;
        }
        match self {
            Self::Present => action.eq_ignore_ascii_case("present"),
            Self::CleanUp => {
                action.eq_ignore_ascii_case("cleanup") || action.eq_ignore_ascii_case("clean-up")
            }
        }
    }
}

impl std::fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_orchestrator_payload() {
        let raw = json!({
            "uid": "6b0d3f6e-1a2b",
            "action": "Present",
            "type": "dns-01",
            "dnsName": "example.org",
            "key": "token-value",
            "resolvedFQDN": "_acme-challenge.example.org.",
            "resolvedZone": "example.org.",
            "resourceNamespace": "default",
            "config": { "miabContextSecretName": "miab" }
        });
        let ch: ChallengeRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(ch.uid, "6b0d3f6e-1a2b");
        assert_eq!(ch.challenge_type, "dns-01");
        assert_eq!(ch.resolved_fqdn, "_acme-challenge.example.org.");
        assert_eq!(ch.record_name(), "_acme-challenge.example.org");
        assert!(ch.config.is_some());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let ch: ChallengeRequest = serde_json::from_value(json!({})).unwrap();
        assert!(ch.uid.is_empty());
        assert!(ch.config.is_none());
        assert!(ch.is_dns01());
    }

    #[test]
    fn dns01_type_variants() {
        let mut ch = ChallengeRequest::default();
        for ty in ["dns-01", "DNS-01", "dns01", ""] {
            ch.challenge_type = ty.to_string();
            assert!(ch.is_dns01(), "{ty} should be accepted");
        }
        ch.challenge_type = "http-01".to_string();
        assert!(!ch.is_dns01());
    }

    #[test]
    fn action_matching() {
        assert!(ChallengeAction::Present.accepts(""));
        assert!(ChallengeAction::Present.accepts("PRESENT"));
        assert!(!ChallengeAction::Present.accepts("cleanup"));
        assert!(ChallengeAction::CleanUp.accepts("CleanUp"));
        assert!(ChallengeAction::CleanUp.accepts("clean-up"));
        assert!(!ChallengeAction::CleanUp.accepts("present"));
    }
}
