use crate::cli::PdfQuality;
use crate::error::{CatalogError, Result};
use catalog_common::Lang;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MASTER: &str = "products_example.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 主檔パス
    pub master_path: PathBuf,
    pub lang: Lang,
    /// 新增・變更が0件でもバックアップを作る
    pub backup_on_noop: bool,
    pub pdf_quality: PdfQuality,
    /// PDFに埋め込むフォント（中文表示にはCJKフォントが必要）
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_path: PathBuf::from(DEFAULT_MASTER),
            lang: Lang::Zh,
            backup_on_noop: true,
            pdf_quality: PdfQuality::Medium,
            font_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("catalog-upsert").join("config.json"))
    }
}
