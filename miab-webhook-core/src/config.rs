//! 启动参数与每个请求的 solver 配置

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SolverError, SolverResult};

/// 最小重复执行间隔（秒）
pub const ENV_UID_DIFF_CHECK_SEC: &str = "UID_DIFF_CHECK_SEC";
/// GC 扫描周期（秒）
pub const ENV_BGRUNNER_SEC_PERIOD: &str = "BGRUNNER_SEC_PERIOD";
/// 去重记录保留时长（秒）
pub const ENV_UID_DIFF_DELETE_SEC: &str = "UID_DIFF_DELETE_SEC";
/// 凭证 secret 所在的 namespace
pub const ENV_CREDS_SECRET_NAMESPACE: &str = "CREDS_SECRET_NAMESPACE";

const DEFAULT_MIN_ACTION_SECS: u64 = 5;
const DEFAULT_SWEEP_PERIOD_SECS: u64 = 1;
const DEFAULT_RETENTION_SECS: u64 = 300;
const DEFAULT_PROVIDER_PAUSE: Duration = Duration::from_millis(100);

/// Process-wide solver settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverSettings {
    /// A UID acted on more recently than this is skipped.
    pub min_action_interval: Duration,
    /// How often the garbage collector sweeps the ledger.
    pub sweep_period: Duration,
    /// Ledger entries older than this are evicted.
    pub retention: Duration,
    /// Namespace the credentials secret is read from.
    pub secret_namespace: String,
    /// Pause before and after each record mutation.
    pub provider_pause: Duration,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            min_action_interval: Duration::from_secs(DEFAULT_MIN_ACTION_SECS),
            sweep_period: Duration::from_secs(DEFAULT_SWEEP_PERIOD_SECS),
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            secret_namespace: String::new(),
            provider_pause: DEFAULT_PROVIDER_PAUSE,
        }
    }
}

impl SolverSettings {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意 key 查找函数读取（测试时无需修改进程环境）
    ///
    /// 空字符串视为未设置。三个整数项必须为正整数，namespace 必填。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| lookup(key).filter(|v| !v.is_empty());

        let secret_namespace = read(ENV_CREDS_SECRET_NAMESPACE)
            .ok_or(SettingsError::Missing(ENV_CREDS_SECRET_NAMESPACE))?;

        Ok(Self {
            min_action_interval: seconds(
                ENV_UID_DIFF_CHECK_SEC,
                read(ENV_UID_DIFF_CHECK_SEC),
                DEFAULT_MIN_ACTION_SECS,
            )?,
            sweep_period: seconds(
                ENV_BGRUNNER_SEC_PERIOD,
                read(ENV_BGRUNNER_SEC_PERIOD),
                DEFAULT_SWEEP_PERIOD_SECS,
            )?,
            retention: seconds(
                ENV_UID_DIFF_DELETE_SEC,
                read(ENV_UID_DIFF_DELETE_SEC),
                DEFAULT_RETENTION_SECS,
            )?,
            secret_namespace,
            provider_pause: DEFAULT_PROVIDER_PAUSE,
        })
    }

    /// 设置 namespace（嵌入使用时跳过环境变量）
    #[must_use]
    pub fn with_secret_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.secret_namespace = namespace.into();
        self
    }
}

fn seconds(
    var: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<Duration, SettingsError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SettingsError::NotPositiveInteger { var, value: raw }),
    }
}

/// Per-request solver configuration carried in the challenge's `config` blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Name of the secret holding `server` / `username` / `password`.
    #[serde(default, alias = "MiabContextSecretName")]
    pub miab_context_secret_name: String,
}

impl SolverConfig {
    /// Decode the raw config blob. A missing or `null` blob yields the default config.
    pub fn decode(raw: Option<&serde_json::Value>) -> SolverResult<Self> {
        match raw {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => {
                Self::deserialize(value).map_err(|e| SolverError::ConfigDecode(e.to_string()))
            }
        }
    }
}
