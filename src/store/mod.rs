//! 主檔ストア
//!
//! 主檔xlsxの読み込み・保存・バックアップと、更新檔の読み込み（欄位検査付き）。

pub mod backup;
pub mod xlsx;

use crate::error::{CatalogError, Result};
use catalog_common::Record;
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

pub use xlsx::Sheet;

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 主檔を読み込み（読めない場合は空リスト）
    pub fn load(&self) -> Vec<Record> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("主檔を読み込めません、空として扱います: {}", e);
                Vec::new()
            }
        }
    }

    /// 主檔を読み込み（存在しない場合のみ空、読み込み失敗はエラー）
    pub fn try_load(&self) -> Result<Vec<Record>> {
        if !self.exists() {
            log::warn!("主檔が見つかりません: {}", self.path.display());
            return Ok(Vec::new());
        }

        let sheet = xlsx::read_sheet(&self.path)?;
        let missing = sheet.missing_columns();
        if !missing.is_empty() {
            log::warn!(
                "主檔に欄位がありません（空として扱います）: {}",
                catalog_common::error::join_columns(&missing)
            );
        }
        Ok(sheet.records)
    }

    /// 主檔を上書き保存（一時ファイルに書いてから置き換え）
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let buffer = xlsx::write_buffer(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, &buffer)
            .map_err(|e| CatalogError::SpreadsheetWrite(format!("{}: {}", temp_path.display(), e)))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CatalogError::SpreadsheetWrite(format!("{}: {}", self.path.display(), e))
        })?;

        log::debug!("主檔保存: {} ({}件)", self.path.display(), records.len());
        Ok(())
    }

    /// 主檔のバックアップを作成（主檔が無ければ None）
    pub fn backup<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Option<PathBuf>>
    where
        Tz::Offset: std::fmt::Display,
    {
        backup::create_backup(&self.path, now)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "master.xlsx".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

/// 更新檔を読み込み（必須欄位が欠けていればエラー）
pub fn read_incoming(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let sheet = xlsx::read_sheet(path)?;
    let missing = sheet.missing_columns();
    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns(missing));
    }

    Ok(sheet.records)
}
