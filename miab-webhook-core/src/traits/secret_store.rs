//! Secret 存储抽象 Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::SecretStoreError;
use crate::types::SecretData;

/// Secret Store Trait
///
/// Platform implementations:
/// - Tests / embedding: `InMemorySecretStore`
/// - Mounted secret volumes: `DirectorySecretStore`
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch a secret by namespace and name.
    ///
    /// # Arguments
    /// * `namespace` - Secret namespace
    /// * `name` - Secret name
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, SecretStoreError>;
}

/// In-memory secret store
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    secrets: Arc<RwLock<HashMap<(String, String), SecretData>>>,
}

impl InMemorySecretStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a secret.
    pub async fn insert(&self, namespace: &str, name: &str, data: SecretData) {
        self.secrets
            .write()
            .await
            .insert((namespace.to_string(), name.to_string()), data);
    }

    /// Remove a secret, returning whether it existed.
    pub async fn remove(&self, namespace: &str, name: &str) -> bool {
        self.secrets
            .write()
            .await
            .remove(&(namespace.to_string(), name.to_string()))
            .is_some()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, SecretStoreError> {
        self.secrets
            .read()
            .await
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}
