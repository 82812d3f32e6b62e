//! 业务逻辑服务层

mod challenge_service;
mod debounce_ledger;
mod garbage_collector;
mod session_holder;

pub use challenge_service::{MiabSolver, SOLVER_NAME};
pub use debounce_ledger::DebounceLedger;
pub use session_holder::SessionHolder;

use std::sync::Arc;

use crate::config::SolverSettings;
use crate::traits::{SecretStore, SessionFactory};

/// 服务上下文 - 持有所有依赖
///
/// 宿主进程创建此上下文，并注入平台特定的 secret 存储实现。
pub struct SolverContext {
    /// 启动参数
    pub settings: SolverSettings,
    /// Secret 存储
    pub secret_store: Arc<dyn SecretStore>,
    /// Provider 会话工厂
    pub session_factory: Arc<dyn SessionFactory>,
}

impl SolverContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        settings: SolverSettings,
        secret_store: Arc<dyn SecretStore>,
        session_factory: Arc<dyn SessionFactory>,
    ) -> Self {
        Self {
            settings,
            secret_store,
            session_factory,
        }
    }
}

/// Everything the solver and the garbage collector share, behind one lock.
pub struct SolverState {
    pub ledger: DebounceLedger,
    pub session: SessionHolder,
    /// Once set, never cleared.
    pub shutting_down: bool,
}

impl SolverState {
    pub fn new(settings: &SolverSettings) -> Self {
        Self {
            ledger: DebounceLedger::new(settings.min_action_interval, settings.retention),
            session: SessionHolder::default(),
            shutting_down: false,
        }
    }

    /// Enter the terminal state and drop the session. Returns whether a session was held.
    pub fn mark_shutting_down(&mut self) -> bool {
        self.shutting_down = true;
        self.session.release()
    }
}
