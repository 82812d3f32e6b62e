//! 外部会话持有者：首次使用时创建 Provider 会话

use std::sync::Arc;

use miab_webhook_provider::DnsProvider;

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::services::SolverContext;
use crate::types::{ChallengeRequest, MiabCredentials};

/// Lazily-created provider session, shared by every request of one solver.
///
/// Must only be touched while the solver lock is held. Once established the session
/// is kept until shutdown, so rotated credentials need a restart to take effect.
#[derive(Default)]
pub struct SessionHolder {
    session: Option<Arc<dyn DnsProvider>>,
}

impl SessionHolder {
    pub fn is_established(&self) -> bool {
        self.session.is_some()
    }

    /// Return the session, creating it from the request's config on first use.
    pub async fn ensure(
        &mut self,
        challenge: &ChallengeRequest,
        ctx: &SolverContext,
    ) -> SolverResult<Arc<dyn DnsProvider>> {
        if let Some(session) = &self.session {
            return Ok(Arc::clone(session));
        }

        let config = SolverConfig::decode(challenge.config.as_ref())?;
        let namespace = ctx.settings.secret_namespace.as_str();
        let name = config.miab_context_secret_name.as_str();
        let fetch_error = |reason: String| SolverError::CredentialFetch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(fetch_error(
                "miabContextSecretName is not set in the solver config".to_string(),
            ));
        }

        let data = ctx
            .secret_store
            .get(namespace, name)
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        let credentials = MiabCredentials::from_secret(&data).map_err(fetch_error)?;

        log::info!(
            "Creating Mail-in-a-Box session for {} as {} (secret {namespace}/{name})",
            credentials.server,
            credentials.username
        );

        let session = ctx
            .session_factory
            .create_session(credentials.into())
            .map_err(|e| fetch_error(format!("failed to create provider session: {e}")))?;

        self.session = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Drop the session. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        self.session.take().is_some()
    }
}
