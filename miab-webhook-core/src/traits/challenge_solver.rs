//! Challenge solver Trait

use async_trait::async_trait;

use crate::error::SolverResult;
use crate::types::ChallengeRequest;

/// A DNS-01 challenge solver as seen by the certificate orchestrator.
///
/// Both operations are idempotent and may be invoked concurrently and repeatedly
/// for the same challenge.
#[async_trait]
pub trait ChallengeSolver: Send + Sync {
    /// Name the orchestrator routes challenges by.
    fn name(&self) -> &'static str;

    /// Make sure the challenge TXT record exists.
    async fn present(&self, challenge: &ChallengeRequest) -> SolverResult<()>;

    /// Make sure the challenge TXT record no longer exists.
    ///
    /// Only the record whose value equals the challenge key is removed.
    async fn clean_up(&self, challenge: &ChallengeRequest) -> SolverResult<()>;
}
