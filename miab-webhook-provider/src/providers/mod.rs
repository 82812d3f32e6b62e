//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod miab;

pub use miab::{MiabProvider, MiabProviderBuilder};
