//! 主檔バックアップ
//!
//! `products.xlsx` → `products_20261018_153000.xlsx`

use crate::error::{CatalogError, Result};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 拡張子の前にタイムスタンプを挿入したパス
pub fn backup_path<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    with_suffix(path, &stamp)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}_{}", stem, suffix),
    };
    path.with_file_name(file_name)
}

/// 既存ファイルと重ならないバックアップパス（同一秒内は連番を付与）
pub fn unique_backup_path<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    let mut candidate = with_suffix(path, &stamp);
    let mut n = 1;
    while candidate.exists() {
        candidate = with_suffix(path, &format!("{}_{}", stamp, n));
        n += 1;
    }
    candidate
}

/// 主檔をコピーしてバックアップ（主檔が無ければ None）
pub fn create_backup<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> Result<Option<PathBuf>>
where
    Tz::Offset: std::fmt::Display,
{
    if !path.exists() {
        return Ok(None);
    }

    let target = unique_backup_path(path, now);
    std::fs::copy(path, &target)
        .map_err(|e| CatalogError::Backup(format!("{} → {}: {}", path.display(), target.display(), e)))?;

    log::info!("バックアップ作成: {}", target.display());
    Ok(Some(target))
}
