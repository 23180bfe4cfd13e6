pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 3] = ["stackflow.local.yaml", "stackflow.yaml", ".stackflow.yaml"];

/// stackflow の設定
///
/// 省略されたキーはデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AWS リージョン（省略時は AWS の標準設定に従う）
    pub region: Option<String>,

    /// AWS プロファイル名
    pub profile: Option<String>,

    /// テンプレートをアップロードするバケット（省略時はインライン送信）
    pub bucket: Option<String>,

    /// Change-Set 作成中のステータス確認間隔（秒）
    pub poll_interval_secs: u64,

    /// スタックイベント取得間隔（秒）
    pub tail_interval_secs: u64,

    /// スタック更新・削除完了待ちの上限（秒）
    pub wait_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            bucket: None,
            poll_interval_secs: 1,
            tail_interval_secs: 2,
            wait_timeout_secs: 3600,
        }
    }
}

impl Settings {
    /// YAML ファイルから読み込む
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // 空ファイルはデフォルト扱い
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn tail_interval(&self) -> Duration {
        Duration::from_secs(self.tail_interval_secs.max(1))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// グローバル設定ファイルのパス (~/.config/stackflow/config.yaml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackflow").join("config.yaml"))
}

/// 設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 STACKFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: stackflow.local.yaml, stackflow.yaml, .stackflow.yaml
/// 3. ~/.config/stackflow/config.yaml (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    // 2. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. グローバル設定ファイル
    if let Some(global_config) = global_config_path() {
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// 設定を読み込む。設定ファイルが無ければデフォルト値を返す
pub fn load_settings() -> Result<Settings> {
    match find_config_file() {
        Ok(path) => Settings::from_path(&path),
        Err(ConfigError::ConfigFileNotFound) => Ok(Settings::default()),
        Err(e) => Err(e),
    }
}
