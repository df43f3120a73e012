use crate::error::{Result, SuiviError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "SUIVI_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    /// ストアのキー。スキーマ変更時はバージョンを上げる
    pub storage_key: String,
    /// 新規作成できる最大件数（編集は対象外）
    pub max_records: usize,
    pub save_confirm_ms: u64,
    pub error_ms: u64,
    pub delete_confirm_ms: u64,
    pub export_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: "candidatures_restaurants_v3".into(),
            max_records: 100,
            save_confirm_ms: 800,
            error_ms: 3000,
            delete_confirm_ms: 2000,
            export_ms: 2000,
        }
    }
}

/// 通知の表示時間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTimings {
    pub save_confirm: Duration,
    pub error: Duration,
    pub delete_confirm: Duration,
    pub export: Duration,
}

impl Default for NoticeTimings {
    fn default() -> Self {
        Config::default().timings()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SuiviError::Config("répertoire personnel introuvable".into()))?;
        Ok(home.join(".config").join("suivi-candidatures").join("config.json"))
    }

    /// データディレクトリ: 引数 > 環境変数 > 設定ファイル > OS標準
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = cli_override {
            return Some(dir.to_path_buf());
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        if let Some(dir) = &self.data_dir {
            return Some(dir.clone());
        }
        dirs::data_dir().map(|d| d.join("suivi-candidatures"))
    }

    pub fn timings(&self) -> NoticeTimings {
        NoticeTimings {
            save_confirm: Duration::from_millis(self.save_confirm_ms),
            error: Duration::from_millis(self.error_ms),
            delete_confirm: Duration::from_millis(self.delete_confirm_ms),
            export: Duration::from_millis(self.export_ms),
        }
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "candidatures_restaurants_v3");
        assert_eq!(config.max_records, 100);
        assert_eq!(config.timings().save_confirm, Duration::from_millis(800));
        assert_eq!(config.timings().error, Duration::from_secs(3));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_records": 20}"#).unwrap();
        assert_eq!(config.max_records, 20);
        assert_eq!(config.storage_key, "candidatures_restaurants_v3");
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let dir = config.resolve_data_dir(Some(Path::new("/from/cli")));
        assert_eq!(dir, Some(PathBuf::from("/from/cli")));
    }
}
