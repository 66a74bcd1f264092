use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, WiringError};

/// RocketMQ 默认 NameServer 地址
pub const DEFAULT_BROKER_ADDRESS: &str = "127.0.0.1:9876";
/// 未指定 tag 时订阅全部
pub const DEFAULT_TAG: &str = "*";
/// 环境配置的 broker 地址
pub const ENV_BROKER_ADDRESS: &str = "NAMESRV_ADDR";

/// 合成名称冲突时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// 冲突即失败（默认）
    #[default]
    FailFast,
    /// 后注册者覆盖先注册者，并记录告警
    LastWriteWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub default_broker_address: String,
    pub default_tag: String,
    pub collision: CollisionPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_broker_address: DEFAULT_BROKER_ADDRESS.to_string(),
            default_tag: DEFAULT_TAG.to_string(),
            collision: CollisionPolicy::default(),
        }
    }
}

impl ScanConfig {
    /// 默认配置，broker 地址取环境变量（若存在且非空）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var(ENV_BROKER_ADDRESS) {
            let addr = addr.trim();
            if !addr.is_empty() {
                tracing::debug!(env = ENV_BROKER_ADDRESS, %addr, "default broker address taken from environment");
                self.default_broker_address = addr.to_string();
            }
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| WiringError::InvalidConfig(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WiringError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn with_collision(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }
}
