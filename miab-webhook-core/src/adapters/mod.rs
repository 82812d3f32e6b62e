//! Storage adapters for running outside the orchestrator's own secret API.

mod directory_secret_store;

pub use directory_secret_store::DirectorySecretStore;
