//! Mounted-volume secret store
//!
//! Reads secrets laid out as `{root}/{namespace}/{name}/{field}`, one file per field,
//! which is how secret volumes are projected into a container.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SecretStoreError;
use crate::traits::SecretStore;
use crate::types::SecretData;

const MAX_FIELD_FILE_SIZE: u64 = 1024 * 1024; // 1MB

/// Secret store backed by a directory tree.
///
/// Hidden entries (`..data` and the timestamped directories a volume projection
/// creates) are skipped; symlinked field files are followed.
#[derive(Debug, Clone)]
pub struct DirectorySecretStore {
    root: PathBuf,
}

impl DirectorySecretStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn secret_dir(&self, namespace: &str, name: &str) -> Result<PathBuf, SecretStoreError> {
        for segment in [namespace, name] {
            if segment.is_empty()
                || segment.starts_with('.')
                || segment.contains('/')
                || segment.contains('\\')
            {
                return Err(SecretStoreError::Access(format!(
                    "invalid secret path segment: {segment:?}"
                )));
            }
        }
        Ok(self.root.join(namespace).join(name))
    }
}

#[async_trait]
impl SecretStore for DirectorySecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretData, SecretStoreError> {
        let dir = self.secret_dir(namespace, name)?;

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SecretStoreError::NotFound {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                });
            }
            Err(e) => {
                return Err(SecretStoreError::Access(format!(
                    "failed to read {}: {e}",
                    dir.display()
                )));
            }
        };

        let mut data = SecretData::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                SecretStoreError::Access(format!("failed to list {}: {e}", dir.display()))
            })?;
            let Some(entry) = entry else { break };

            let Ok(field) = entry.file_name().into_string() else {
                continue;
            };
            if field.starts_with('.') {
                continue;
            }

            let path = entry.path();
            // metadata() 会跟随符号链接
            let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
                SecretStoreError::Access(format!("failed to stat {}: {e}", path.display()))
            })?;
            if !metadata.is_file() {
                continue;
            }
            if metadata.len() > MAX_FIELD_FILE_SIZE {
                return Err(SecretStoreError::Access(format!(
                    "secret field file too large: {} ({} bytes)",
                    path.display(),
                    metadata.len()
                )));
            }

            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                SecretStoreError::Access(format!("failed to read {}: {e}", path.display()))
            })?;
            data.insert(field, bytes);
        }

        log::debug!(
            "Loaded secret {namespace}/{name} with {} field(s) from {}",
            data.len(),
            dir.display()
        );
        Ok(data)
    }
}
