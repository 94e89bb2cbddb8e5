use crate::error::{StocktakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stocktake_common::ExportLayout;

const USERS_ENV: &str = "STOCKTAKE_USERS";
const PRODUCTS_ENV: &str = "STOCKTAKE_PRODUCTS";
const OUTPUT_DIR_ENV: &str = "STOCKTAKE_OUTPUT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 操作员一覧 users.json
    pub users_path: Option<PathBuf>,
    /// 货品清单 products.xlsx / products.json
    pub products_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub export_layout: ExportLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_path: None,
            products_path: None,
            output_dir: PathBuf::from("."),
            export_layout: ExportLayout::Flat,
        }
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
            .ok_or_else(|| StocktakeError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("stocktake").join("config.json"))
    }

    /// 環境変数を優先
    pub fn users_path(&self) -> Option<PathBuf> {
        env_path(USERS_ENV).or_else(|| self.users_path.clone())
    }

    pub fn products_path(&self) -> Option<PathBuf> {
        env_path(PRODUCTS_ENV).or_else(|| self.products_path.clone())
    }

    pub fn output_dir(&self) -> PathBuf {
        env_path(OUTPUT_DIR_ENV).unwrap_or_else(|| self.output_dir.clone())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
