//! 后台 GC 任务：定期清理过期的去重记录

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::services::SolverState;

/// Spawn the collector on the current runtime.
pub fn spawn(
    state: Arc<Mutex<SolverState>>,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run(state, period, shutdown))
}

/// Sweep every `period` until `shutdown` fires.
///
/// On shutdown the solver state is marked as terminating and the provider session
/// is dropped, under the same lock the solver uses.
pub async fn run(state: Arc<Mutex<SolverState>>, period: Duration, shutdown: CancellationToken) {
    log::debug!("Garbage collector started, sweeping every {period:?}");

    loop {
        tokio::select! {
            () = shutdown.cancelled() => {}
            () = tokio::time::sleep(period) => {}
        }

        let mut state = state.lock().await;

        if shutdown.is_cancelled() {
            let released = state.mark_shutting_down();
            log::info!(
                "Shutdown signalled, garbage collector stopping (session released: {released})"
            );
            return;
        }

        let evicted = state.ledger.sweep(Instant::now());
        if evicted > 0 {
            log::debug!(
                "Evicted {evicted} expired challenge entr{}, {} still tracked",
                if evicted == 1 { "y" } else { "ies" },
                state.ledger.len()
            );
        }
    }
}
