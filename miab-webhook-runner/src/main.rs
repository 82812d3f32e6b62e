//! Mail-in-a-Box DNS-01 solver host
//!
//! Reads one challenge request per line on stdin and writes one response per line
//! on stdout. Requests are handled concurrently; the solver serializes the actual
//! provider work. Logs go to stderr.
//!
//! Settings come from the environment (`CREDS_SECRET_NAMESPACE`, `UID_DIFF_CHECK_SEC`,
//! `BGRUNNER_SEC_PERIOD`, `UID_DIFF_DELETE_SEC`); credentials secrets are read from
//! the directory named by `MIAB_SECRETS_DIR`.

mod protocol;

use std::process::ExitCode;
use std::sync::Arc;

use miab_webhook_core::{
    ChallengeSolver, DirectorySecretStore, MiabSessionFactory, MiabSolver, SolverSettings,
};
use protocol::{ChallengeResponse, handle_line};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::signal;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ENV_SECRETS_DIR: &str = "MIAB_SECRETS_DIR";
const DEFAULT_SECRETS_DIR: &str = "/var/run/secrets/miab-webhook";

async fn write_response(out: &Mutex<Stdout>, response: &ChallengeResponse) -> anyhow::Result<()> {
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    let mut out = out.lock().await;
    out.write_all(line.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout 用于协议输出，日志写 stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = match SolverSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let secrets_dir =
        std::env::var(ENV_SECRETS_DIR).unwrap_or_else(|_| DEFAULT_SECRETS_DIR.to_string());
    tracing::info!("Reading credentials secrets from {secrets_dir}");

    let solver = Arc::new(MiabSolver::start(
        settings,
        Arc::new(DirectorySecretStore::new(secrets_dir)),
        Arc::new(MiabSessionFactory),
    ));
    tracing::info!("Solver '{}' ready, reading requests from stdin", solver.name());

    let out = Arc::new(Mutex::new(tokio::io::stdout()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let solver = Arc::clone(&solver);
                    let out = Arc::clone(&out);
                    tasks.spawn(async move {
                        let response = handle_line(solver.as_ref(), &line).await;
                        if let Err(e) = write_response(&out, &response).await {
                            tracing::error!("Failed to write response for {}: {e}", response.uid);
                        }
                    });
                }
                Ok(None) => {
                    tracing::info!("stdin closed");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
    }

    // 进行中的请求执行完毕后再关闭
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Request task failed: {e}");
        }
    }
    solver.shutdown().await;
    tracing::info!("Solver stopped");

    ExitCode::SUCCESS
}
