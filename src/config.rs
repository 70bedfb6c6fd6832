use crate::error::{PpiError, Result};
use ppi_common::ShopProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 帳票出力先を上書きする環境変数
pub const REPORTS_DIR_ENV: &str = "PPI_REPORTS_DIR";

/// プロセス全体の静的設定（起動時に一度だけ読み込み、以後は参照で渡す）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub shop: ShopProfile,
    pub reports_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default_config()
        };

        // 環境変数を優先
        if let Ok(dir) = std::env::var(REPORTS_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.reports_dir = PathBuf::from(dir);
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
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

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| {
                PpiError::Config("ホームディレクトリが見つかりません".into())
            })?;
        Ok(home.join(".config").join("ppi-report").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            shop: ShopProfile::default(),
            reports_dir: PathBuf::from("reports"),
        }
    }

    /// 出力先ディレクトリを作成（起動時に一度）
    pub fn ensure_reports_dir(&self) -> Result<()> {
        if !self.reports_dir.exists() {
            std::fs::create_dir_all(&self.reports_dir)?;
            log::info!("created reports directory: {}", self.reports_dir.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.shop.name, "AUTO MAZEN");
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.shop.name = "Garage 42".into();
        config.shop.logo_path = None;
        config.reports_dir = dir.path().join("out");
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).expect("設定読み込み失敗");
        assert_eq!(loaded.shop.name, "Garage 42");
        assert_eq!(loaded.shop.logo_path, None);
        assert_eq!(loaded.reports_dir, dir.path().join("out"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"shop": {"name": "Only Name"}}"#).unwrap();

        let loaded = Config::load_from(&path).expect("設定読み込み失敗");
        assert_eq!(loaded.shop.name, "Only Name");
        assert_eq!(loaded.shop.phone, "03 419 833");
        assert_eq!(loaded.reports_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_ensure_reports_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config {
            reports_dir: dir.path().join("reports"),
            ..Default::default()
        };
        config.ensure_reports_dir().expect("ディレクトリ作成失敗");
        assert!(config.reports_dir.is_dir());
        // 2回目も成功する
        config.ensure_reports_dir().expect("ディレクトリ作成失敗");
    }
}
