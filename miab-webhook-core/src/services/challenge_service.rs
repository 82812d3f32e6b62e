//! DNS-01 challenge 服务：present / clean-up

use std::sync::Arc;

use async_trait::async_trait;
use miab_webhook_provider::{DnsProvider, DnsRecordType, log_sanitizer::mask_value};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::garbage_collector;
use crate::config::SolverSettings;
use crate::error::{SolverError, SolverResult};
use crate::services::{SolverContext, SolverState};
use crate::traits::{ChallengeSolver, SecretStore, SessionFactory};
use crate::types::{ChallengeAction, ChallengeRequest};

/// Solver name registered with the orchestrator.
pub const SOLVER_NAME: &str = "mail-in-a-box";

/// Mail-in-a-Box DNS-01 solver.
///
/// All provider work is serialized behind one lock, including the pauses around
/// each mutation. Repeated calls for the same challenge UID inside the minimum
/// interval return immediately.
pub struct MiabSolver {
    ctx: SolverContext,
    state: Arc<Mutex<SolverState>>,
    shutdown: CancellationToken,
    collector: Mutex<Option<JoinHandle<()>>>,
}

impl MiabSolver {
    /// Create a solver without a garbage collector.
    #[must_use]
    pub fn new(
        settings: SolverSettings,
        secret_store: Arc<dyn SecretStore>,
        session_factory: Arc<dyn SessionFactory>,
    ) -> Self {
        let state = SolverState::new(&settings);
        Self {
            ctx: SolverContext::new(settings, secret_store, session_factory),
            state: Arc::new(Mutex::new(state)),
            shutdown: CancellationToken::new(),
            collector: Mutex::new(None),
        }
    }

    /// Create a solver and spawn its garbage collector on the current runtime.
    #[must_use]
    pub fn start(
        settings: SolverSettings,
        secret_store: Arc<dyn SecretStore>,
        session_factory: Arc<dyn SessionFactory>,
    ) -> Self {
        let mut solver = Self::new(settings, secret_store, session_factory);
        let handle = garbage_collector::spawn(
            Arc::clone(&solver.state),
            solver.ctx.settings.sweep_period,
            solver.shutdown.clone(),
        );
        *solver.collector.get_mut() = Some(handle);
        log::info!(
            "Solver '{SOLVER_NAME}' started (min interval {:?}, retention {:?}, secrets in '{}')",
            solver.ctx.settings.min_action_interval,
            solver.ctx.settings.retention,
            solver.ctx.settings.secret_namespace
        );
        solver
    }

    /// Token that stops the solver when cancelled. Hosts wire process signals to it.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Signal shutdown and wait for the garbage collector to stop.
    ///
    /// Afterwards every call fails with [`SolverError::ShuttingDown`] and the
    /// provider session has been released. Calling it again is a no-op.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        if let Some(handle) = self.collector.lock().await.take() {
            if let Err(e) = handle.await {
                log::error!("Garbage collector task failed: {e}");
            }
        }

        self.state.lock().await.mark_shutting_down();
    }

    pub async fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled() || self.state.lock().await.shutting_down
    }

    pub async fn has_session(&self) -> bool {
        self.state.lock().await.session.is_established()
    }

    /// UIDs currently held in the debounce ledger, sorted.
    pub async fn tracked_challenges(&self) -> Vec<String> {
        self.state.lock().await.ledger.uids()
    }

    fn check_request(
        &self,
        state: &SolverState,
        challenge: &ChallengeRequest,
        action: ChallengeAction,
    ) -> SolverResult<()> {
        if state.shutting_down || self.shutdown.is_cancelled() {
            return Err(SolverError::ShuttingDown {
                operation: action.as_str(),
            });
        }
        if !action.accepts(&challenge.action) {
            return Err(SolverError::InvalidAction {
                operation: action.as_str(),
                action: challenge.action.clone(),
            });
        }
        if !challenge.is_dns01() {
            return Err(SolverError::UnsupportedChallengeType(
                challenge.challenge_type.clone(),
            ));
        }
        Ok(())
    }

    async fn run(&self, challenge: &ChallengeRequest, action: ChallengeAction) -> SolverResult<()> {
        let mut state = self.state.lock().await;
        self.check_request(&state, challenge, action)?;

        if state.ledger.is_fresh(&challenge.uid, Instant::now()) {
            log::debug!(
                "Skipping {action} for {}: already handled within {:?}",
                challenge.uid,
                self.ctx.settings.min_action_interval
            );
            return Ok(());
        }

        let provider = state.session.ensure(challenge, &self.ctx).await?;
        let qname = challenge.record_name();

        let records = provider
            .list_records(qname, DnsRecordType::Txt)
            .await
            .map_err(SolverError::ProviderQuery)?;
        let exists = records.iter().any(|r| r.matches(qname, &challenge.key));

        match (action, exists) {
            (ChallengeAction::Present, true) => {
                log::info!("TXT record {qname} already present, nothing to do");
            }
            (ChallengeAction::CleanUp, false) => {
                log::info!("TXT record {qname} already absent, nothing to do");
            }
            (ChallengeAction::Present, false) => {
                self.mutate(provider.as_ref(), qname, || {
                    provider.create_record(qname, DnsRecordType::Txt, &challenge.key)
                })
                .await?;
                log::info!(
                    "Presented TXT record {qname} = {}",
                    mask_value(&challenge.key)
                );
            }
            (ChallengeAction::CleanUp, true) => {
                self.mutate(provider.as_ref(), qname, || {
                    provider.delete_record(qname, DnsRecordType::Txt, &challenge.key)
                })
                .await?;
                log::info!(
                    "Removed TXT record {qname} = {}",
                    mask_value(&challenge.key)
                );
            }
        }

        state.ledger.record(&challenge.uid, Instant::now());
        Ok(())
    }

    /// Pause, apply one record change, pause, then ask the box to rebuild its zones.
    ///
    /// A failed rebuild is only logged: the record change itself already succeeded.
    async fn mutate<F, Fut>(
        &self,
        provider: &dyn DnsProvider,
        qname: &str,
        change: F,
    ) -> SolverResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = miab_webhook_provider::Result<()>>,
    {
        let pause = self.ctx.settings.provider_pause;

        tokio::time::sleep(pause).await;
        change().await.map_err(SolverError::ProviderMutation)?;
        tokio::time::sleep(pause).await;

        if let Err(e) = provider.update_dns(false).await {
            log::warn!("DNS update after changing {qname} failed: {e}");
        }
        Ok(())
    }

    fn log_outcome(
        action: ChallengeAction,
        challenge: &ChallengeRequest,
        result: &SolverResult<()>,
    ) {
        if let Err(e) = result {
            let (uid, fqdn) = (&challenge.uid, &challenge.resolved_fqdn);
            if e.is_expected() {
                log::warn!("{action} for {uid} ({fqdn}) failed: {e}");
            } else {
                log::error!("{action} for {uid} ({fqdn}) failed: {e}");
            }
        }
    }
}

impl Drop for MiabSolver {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl ChallengeSolver for MiabSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn present(&self, challenge: &ChallengeRequest) -> SolverResult<()> {
        let result = self.run(challenge, ChallengeAction::Present).await;
        Self::log_outcome(ChallengeAction::Present, challenge, &result);
        result
    }

    async fn clean_up(&self, challenge: &ChallengeRequest) -> SolverResult<()> {
        let result = self.run(challenge, ChallengeAction::CleanUp).await;
        Self::log_outcome(ChallengeAction::CleanUp, challenge, &result);
        result
    }
}
