//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use miab_webhook_provider::{CredentialValidationError, ProviderError};

/// Errors returned by `present` / `clean_up`.
///
/// Every variant is terminal for the call that produced it. None of them leaves a
/// debounce entry behind, so the orchestrator's next retry runs the full sequence.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum SolverError {
    /// The shutdown signal has fired; no new work is accepted.
    #[error("not performing {operation} because shutdown has been signalled and the solver is terminating")]
    ShuttingDown { operation: &'static str },

    /// The request's action does not match the operation it was routed to.
    #[error("{operation} called with invalid action: {action}")]
    InvalidAction {
        operation: &'static str,
        action: String,
    },

    /// Only DNS-01 challenges can be solved.
    #[error("unsupported challenge type: {0}")]
    UnsupportedChallengeType(String),

    /// The per-request solver config blob could not be decoded.
    #[error("error decoding solver config: {0}")]
    ConfigDecode(String),

    /// The credentials secret could not be read, or did not yield a usable session.
    #[error("error importing the credentials secret '{namespace}/{name}': {reason}")]
    CredentialFetch {
        namespace: String,
        name: String,
        reason: String,
    },

    /// Listing existing records failed.
    #[error("failed to query TXT records: {0}")]
    ProviderQuery(ProviderError),

    /// Adding or removing a record failed.
    #[error("failed to modify TXT records: {0}")]
    ProviderMutation(ProviderError),
}

impl SolverError {
    /// Whether it is expected behavior (bad input, misconfiguration, shutdown), used for
    /// log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ShuttingDown { .. }
            | Self::InvalidAction { .. }
            | Self::UnsupportedChallengeType(_)
            | Self::ConfigDecode(_)
            | Self::CredentialFetch { .. } => true,
            Self::ProviderQuery(e) | Self::ProviderMutation(e) => e.is_expected(),
        }
    }
}

/// Solver Result type alias
pub type SolverResult<T> = std::result::Result<T, SolverError>;

/// Secret store lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretStoreError {
    /// No secret with that name exists in the namespace.
    #[error("secret '{namespace}/{name}' not found")]
    NotFound { namespace: String, name: String },

    /// The store could not be read.
    #[error("secret store access failed: {0}")]
    Access(String),
}

/// Invalid startup settings. Fatal: the solver must not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required variable is unset or empty.
    #[error("env var {0} must be specified")]
    Missing(&'static str),

    /// A numeric variable is not a positive integer.
    #[error("env var {var} is not a positive integer: {value:?}")]
    NotPositiveInteger { var: &'static str, value: String },
}
