//! 从 secret 中提取的 Mail-in-a-Box 凭证

use std::collections::HashMap;

use miab_webhook_provider::ProviderCredentials;

/// Raw secret payload: field name -> bytes.
pub type SecretData = HashMap<String, Vec<u8>>;

/// Admin credentials for one Mail-in-a-Box server.
#[derive(Clone, PartialEq, Eq)]
pub struct MiabCredentials {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for MiabCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiabCredentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl MiabCredentials {
    /// Extract `server` / `username` / `password` from a secret.
    ///
    /// Values are decoded as UTF-8 and trimmed. The returned message names the
    /// offending field and is meant to be wrapped with the secret's location.
    pub fn from_secret(data: &SecretData) -> Result<Self, String> {
        let mut fields = HashMap::with_capacity(3);
        for key in ["server", "username", "password"] {
            if let Some(bytes) = data.get(key) {
                let value = std::str::from_utf8(bytes)
                    .map_err(|_| format!("field '{key}' is not valid UTF-8"))?;
                fields.insert(key.to_string(), value.to_string());
            }
        }

        match ProviderCredentials::from_map(&fields).map_err(|e| e.to_string())? {
            ProviderCredentials::Miab {
                server,
                username,
                password,
            } => Ok(Self {
                server,
                username,
                password,
            }),
        }
    }
}

impl From<MiabCredentials> for ProviderCredentials {
    fn from(c: MiabCredentials) -> Self {
        Self::Miab {
            server: c.server,
            username: c.username,
            password: c.password,
        }
    }
}
