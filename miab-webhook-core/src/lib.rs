//! Mail-in-a-Box DNS-01 challenge solver core
//!
//! Decides, for each present / clean-up call from a certificate orchestrator,
//! whether a TXT record actually has to change on the box, and performs at most
//! one change per logical request. Provides:
//! - A debounce ledger keyed by challenge UID, swept by a background task
//! - A lazily-created provider session built from a credentials secret
//! - Secret stores (in-memory and mounted directory)
//!
//! The orchestrator's webhook server is not part of this crate; hosts construct a
//! [`MiabSolver`] and route requests to the [`ChallengeSolver`] methods.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use miab_webhook_core::{
//!     ChallengeSolver, DirectorySecretStore, MiabSessionFactory, MiabSolver, SolverSettings,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SolverSettings::from_env()?;
//! let solver = MiabSolver::start(
//!     settings,
//!     Arc::new(DirectorySecretStore::new("/var/run/secrets/miab")),
//!     Arc::new(MiabSessionFactory),
//! );
//!
//! let request = serde_json::from_value(serde_json::json!({
//!     "uid": "1",
//!     "key": "token",
//!     "resolvedFQDN": "_acme-challenge.example.org.",
//! }))?;
//! solver.present(&request).await?;
//! solver.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use adapters::DirectorySecretStore;
pub use config::{SolverConfig, SolverSettings};
pub use error::{SecretStoreError, SettingsError, SolverError, SolverResult};
pub use services::{MiabSolver, SOLVER_NAME, SolverContext};
pub use traits::{
    ChallengeSolver, InMemorySecretStore, MiabSessionFactory, SecretStore, SessionFactory,
};
pub use types::{ChallengeRequest, MiabCredentials, SecretData};
