//! 外部协作者抽象 trait 定义

mod challenge_solver;
mod secret_store;
mod session_factory;

pub use challenge_solver::ChallengeSolver;
pub use secret_store::{InMemorySecretStore, SecretStore};
pub use session_factory::{MiabSessionFactory, SessionFactory};
