use crate::error::{FloraScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_BASE_ENV: &str = "FLORASCAN_API_BASE";
const DEFAULT_API_BASE: &str = "http://localhost:5000";
const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 識別APIのオリジン（`/api/identify` を付けて呼ぶ）
    pub api_base: String,
    /// データセット・識別結果の保存先
    pub storage_path: Option<PathBuf>,
    /// 未指定ならHTTPクライアントのデフォルト
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            storage_path: None,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FloraScanError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("florascan"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// APIオリジン。環境変数を優先
    pub fn api_base(&self) -> String {
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => base,
            _ => self.api_base.clone(),
        }
    }

    pub fn set_api_base(&mut self, base: String) -> Result<()> {
        let base = base.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(FloraScanError::Config(format!("API base must be an http(s) URL: {}", base)));
        }
        self.api_base = base;
        self.save()
    }

    pub fn storage_file(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(STORAGE_FILE_NAME)),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
