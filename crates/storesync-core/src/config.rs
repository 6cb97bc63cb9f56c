//! Config - 疑似レイテンシなどの設定
//!
//! TOML ファイルから読み込みます。省略したキーはデフォルト値になります。
//!
//! ```toml
//! users_latency_ms = 500
//! detail_latency_ms = 800
//! ```
//!
//! 一覧取得のデフォルトは 500ms（一覧ページ向けの値）。
//! 遅い一覧 API を想定する場合は `users_latency_ms = 3000` のように指定します。

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// 一覧取得の疑似レイテンシ
    pub users_latency_ms: u64,

    /// 詳細取得の疑似レイテンシ（一覧取得の分は含まない）
    pub detail_latency_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            users_latency_ms: 500,
            detail_latency_ms: 800,
        }
    }
}

impl SyncConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn users_latency(&self) -> Duration {
        Duration::from_millis(self.users_latency_ms)
    }

    pub fn detail_latency(&self) -> Duration {
        Duration::from_millis(self.detail_latency_ms)
    }
}
