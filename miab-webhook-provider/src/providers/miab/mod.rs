//! Mail-in-a-Box DNS Provider
//!
//! Talks to the box's admin daemon (`/admin/dns/custom/...`) with HTTP basic auth.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{admin_base_url, create_http_client};

pub(crate) use types::MiabRecord;

pub(crate) const PROVIDER_NAME: &str = "miab";

/// Mail-in-a-Box DNS Provider
pub struct MiabProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) max_retries: u32,
}

/// Mail-in-a-Box Provider Builder
pub struct MiabProviderBuilder {
    server: String,
    username: String,
    password: String,
    max_retries: u32,
}

impl MiabProviderBuilder {
    fn new(server: &str, username: String, password: String) -> Self {
        Self {
            server: server.to_string(),
            username,
            password,
            max_retries: 2,
        }
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn build(self) -> Result<MiabProvider> {
        Ok(MiabProvider {
            client: create_http_client(PROVIDER_NAME)?,
            base_url: admin_base_url(&self.server, PROVIDER_NAME)?,
            username: self.username,
            password: self.password,
            max_retries: self.max_retries,
        })
    }
}

impl MiabProvider {
    pub fn new(server: &str, username: String, password: String) -> Result<Self> {
        Self::builder(server, username, password).build()
    }

    pub fn builder(server: &str, username: String, password: String) -> MiabProviderBuilder {
        MiabProviderBuilder::new(server, username, password)
    }

    /// Admin API root this provider talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
