use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============ DNS Record Types ============

/// DNS record types accepted by the custom-records API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Upper-case wire name used in API paths (`"TXT"`, `"AAAA"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom DNS record as stored on the box.
///
/// Records have no ID: they are addressed by `(qname, rtype, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Fully-qualified record name without the trailing dot.
    pub qname: String,
    /// Record type.
    pub rtype: DnsRecordType,
    /// Record content.
    pub value: String,
}

impl DnsRecord {
    /// Whether this record is exactly `(qname, value)`.
    ///
    /// Names compare case-insensitively and ignore a trailing dot; values compare exactly.
    pub fn matches(&self, qname: &str, value: &str) -> bool {
        self.qname
            .trim_end_matches('.')
            .eq_ignore_ascii_case(qname.trim_end_matches('.'))
            && self.value == value
    }
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// ```json
/// {
///   "provider": "miab",
///   "credentials": { "server": "box.example.org", "username": "...", "password": "..." }
/// }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Mail-in-a-Box admin credentials.
    #[serde(rename = "miab")]
    Miab {
        /// Box hostname (`box.example.org`) or base URL (`https://box.example.org/admin`).
        server: String,
        /// Admin account email address.
        username: String,
        /// Admin account password.
        password: String,
    },
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miab {
                server, username, ..
            } => f
                .debug_struct("Miab")
                .field("server", server)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

impl ProviderCredentials {
    /// Construct credentials from a flat key-value map, validating required fields.
    ///
    /// Expected keys: `server`, `username`, `password`.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        Ok(Self::Miab {
            server: Self::get_required_field(map, "server", "Server")?,
            username: Self::get_required_field(map, "username", "Username")?,
            password: Self::get_required_field(map, "password", "Password")?,
        })
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Self::Miab {
                server,
                username,
                password,
            } => [
                ("server".to_string(), server.clone()),
                ("username".to_string(), username.clone()),
                ("password".to_string(), password.clone()),
            ]
            .into(),
        }
    }
}
