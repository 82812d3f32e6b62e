//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use miab_webhook_provider::{
    DnsProvider, DnsRecord, DnsRecordType, ProviderCredentials, ProviderError,
    Result as ProviderResult,
};
use tokio::sync::RwLock;

use crate::config::SolverSettings;
use crate::services::{MiabSolver, SolverContext};
use crate::traits::{InMemorySecretStore, SessionFactory};
use crate::types::{ChallengeRequest, SecretData};

pub const TEST_NAMESPACE: &str = "cert-manager";
pub const TEST_SECRET_NAME: &str = "miab-credentials";

// ===== MockDnsProvider =====

/// In-memory box: records addressed by `(qname, rtype, value)`.
#[derive(Default)]
pub struct MockDnsProvider {
    records: RwLock<Vec<DnsRecord>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    update_calls: AtomicUsize,
    /// 如果 Some，下一次对应调用返回此错误
    list_error: RwLock<Option<ProviderError>>,
    create_error: RwLock<Option<ProviderError>>,
    delete_error: RwLock<Option<ProviderError>>,
    update_error: RwLock<Option<ProviderError>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_txt(&self, qname: &str, value: &str) {
        self.records.write().await.push(DnsRecord {
            qname: qname.trim_end_matches('.').to_string(),
            rtype: DnsRecordType::Txt,
            value: value.to_string(),
        });
    }

    pub async fn records(&self) -> Vec<DnsRecord> {
        self.records.read().await.clone()
    }

    pub async fn has_txt(&self, qname: &str, value: &str) -> bool {
        self.records
            .read()
            .await
            .iter()
            .any(|r| r.rtype == DnsRecordType::Txt && r.matches(qname, value))
    }

    /// 模拟记录被外部删除
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    pub async fn fail_next_list(&self, err: ProviderError) {
        *self.list_error.write().await = Some(err);
    }

    pub async fn fail_next_create(&self, err: ProviderError) {
        *self.create_error.write().await = Some(err);
    }

    pub async fn fail_next_delete(&self, err: ProviderError) {
        *self.delete_error.write().await = Some(err);
    }

    pub async fn fail_next_update(&self, err: ProviderError) {
        *self.update_error.write().await = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        Ok(true)
    }

    async fn list_records(
        &self,
        qname: &str,
        rtype: DnsRecordType,
    ) -> ProviderResult<Vec<DnsRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_error.write().await.take() {
            return Err(err);
        }
        let wanted = qname.trim_end_matches('.');
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.rtype == rtype && r.qname.eq_ignore_ascii_case(wanted))
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        qname: &str,
        rtype: DnsRecordType,
        value: &str,
    ) -> ProviderResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.create_error.write().await.take() {
            return Err(err);
        }
        self.records.write().await.push(DnsRecord {
            qname: qname.trim_end_matches('.').to_string(),
            rtype,
            value: value.to_string(),
        });
        Ok(())
    }

    async fn delete_record(
        &self,
        qname: &str,
        rtype: DnsRecordType,
        value: &str,
    ) -> ProviderResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.delete_error.write().await.take() {
            return Err(err);
        }
        self.records
            .write()
            .await
            .retain(|r| !(r.rtype == rtype && r.matches(qname, value)));
        Ok(())
    }

    async fn update_dns(&self, _force: bool) -> ProviderResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.update_error.write().await.take() {
            return Err(err);
        }
        Ok(())
    }
}

// ===== MockSessionFactory =====

/// Hands out the same mock provider and counts how often it was asked to.
pub struct MockSessionFactory {
    provider: Arc<MockDnsProvider>,
    created: AtomicUsize,
    fail_next: AtomicBool,
    last_credentials: Mutex<Option<ProviderCredentials>>,
}

impl MockSessionFactory {
    pub fn new(provider: Arc<MockDnsProvider>) -> Self {
        Self {
            provider,
            created: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
            last_credentials: Mutex::new(None),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn last_credentials(&self) -> Option<ProviderCredentials> {
        self.last_credentials.lock().unwrap().clone()
    }
}

impl SessionFactory for MockSessionFactory {
    fn create_session(
        &self,
        credentials: ProviderCredentials,
    ) -> ProviderResult<Arc<dyn DnsProvider>> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ProviderError::InvalidParameter {
                provider: "mock".to_string(),
                param: "server".to_string(),
                detail: "unreachable box".to_string(),
            });
        }
        *self.last_credentials.lock().unwrap() = Some(credentials);
        self.created.fetch_add(1, Ordering::SeqCst);
        let provider: Arc<dyn DnsProvider> = self.provider.clone();
        Ok(provider)
    }
}

// ===== 测试工厂方法 =====

pub fn miab_secret() -> SecretData {
    [
        ("server", "box.example.org"),
        ("username", "admin@example.org"),
        ("password", "s3cret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
    .collect()
}

pub fn test_settings() -> SolverSettings {
    SolverSettings::default().with_secret_namespace(TEST_NAMESPACE)
}

/// DNS-01 present request for `_acme-challenge.example.org.`.
pub fn challenge(uid: &str, key: &str) -> ChallengeRequest {
    ChallengeRequest {
        uid: uid.to_string(),
        challenge_type: "dns-01".to_string(),
        dns_name: "example.org".to_string(),
        key: key.to_string(),
        resolved_fqdn: "_acme-challenge.example.org.".to_string(),
        resolved_zone: "example.org.".to_string(),
        resource_namespace: "default".to_string(),
        config: Some(serde_json::json!({ "miabContextSecretName": TEST_SECRET_NAME })),
        ..ChallengeRequest::default()
    }
}

async fn seeded_secret_store() -> Arc<InMemorySecretStore> {
    let secrets = Arc::new(InMemorySecretStore::new());
    secrets
        .insert(TEST_NAMESPACE, TEST_SECRET_NAME, miab_secret())
        .await;
    secrets
}

pub struct TestContext {
    pub ctx: SolverContext,
    pub provider: Arc<MockDnsProvider>,
    pub factory: Arc<MockSessionFactory>,
    pub secrets: Arc<InMemorySecretStore>,
}

pub async fn create_test_context() -> TestContext {
    let provider = Arc::new(MockDnsProvider::new());
    let factory = Arc::new(MockSessionFactory::new(provider.clone()));
    let secrets = seeded_secret_store().await;
    TestContext {
        ctx: SolverContext::new(test_settings(), secrets.clone(), factory.clone()),
        provider,
        factory,
        secrets,
    }
}

pub struct TestSolver {
    pub solver: MiabSolver,
    pub provider: Arc<MockDnsProvider>,
    pub factory: Arc<MockSessionFactory>,
    pub secrets: Arc<InMemorySecretStore>,
}

impl TestSolver {
    /// Solver without a garbage collector and with an empty secret store.
    pub fn unstarted() -> Self {
        let provider = Arc::new(MockDnsProvider::new());
        let factory = Arc::new(MockSessionFactory::new(provider.clone()));
        let secrets = Arc::new(InMemorySecretStore::new());
        Self {
            solver: MiabSolver::new(test_settings(), secrets.clone(), factory.clone()),
            provider,
            factory,
            secrets,
        }
    }

    /// Solver without a garbage collector, credentials in place.
    pub async fn unstarted_with_secret() -> Self {
        let t = Self::unstarted();
        t.secrets
            .insert(TEST_NAMESPACE, TEST_SECRET_NAME, miab_secret())
            .await;
        t
    }
}

/// Solver with its garbage collector running and credentials in place.
pub async fn create_test_solver() -> TestSolver {
    let provider = Arc::new(MockDnsProvider::new());
    let factory = Arc::new(MockSessionFactory::new(provider.clone()));
    let secrets = seeded_secret_store().await;
    TestSolver {
        solver: MiabSolver::start(test_settings(), secrets.clone(), factory.clone()),
        provider,
        factory,
        secrets,
    }
}
