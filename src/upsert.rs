//! 一括更新（Upsert）
//!
//! 1. 更新檔の欄位検査（不足があればここで中止、主檔には触れない）
//! 2. 差分プレビュー
//! 3. 主檔バックアップ → マージ → 保存

use crate::error::Result;
use crate::store::{self, RecordStore};
use catalog_common::{diff, merge, DiffReport, Record, COMPARED_COLUMNS};
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct UpsertOptions {
    /// 新增・變更が0件でもバックアップと保存を行う
    pub backup_on_noop: bool,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self { backup_on_noop: true }
    }
}

/// 適用前の差分プレビュー
#[derive(Debug, Clone)]
pub struct UpsertPreview {
    pub master: Vec<Record>,
    pub incoming: Vec<Record>,
    pub report: DiffReport,
}

/// 適用結果
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub merged: Vec<Record>,
    pub report: DiffReport,
    /// 作成したバックアップ
    pub backup: Option<PathBuf>,
    /// 主檔を書き換えたか
    pub written: bool,
}

/// 更新檔を読み込んで差分を計算
pub fn preview(store: &RecordStore, incoming_path: &Path) -> Result<UpsertPreview> {
    let incoming = store::read_incoming(incoming_path)?;
    let master = store.try_load()?;
    Ok(UpsertPreview::new(master, incoming))
}

impl UpsertPreview {
    pub fn new(master: Vec<Record>, incoming: Vec<Record>) -> Self {
        let report = diff(&master, &incoming, &COMPARED_COLUMNS);
        log::debug!(
            "差分: 新增{} 變更{} 相同{}",
            report.inserted.len(),
            report.updated.len(),
            report.unchanged.len()
        );
        Self { master, incoming, report }
    }

    /// 主檔に適用
    pub fn apply<Tz: TimeZone>(
        self,
        store: &RecordStore,
        options: UpsertOptions,
        now: &DateTime<Tz>,
    ) -> Result<ApplyOutcome>
    where
        Tz::Offset: std::fmt::Display,
    {
        let merged = merge(&self.master, &self.incoming);

        if self.report.is_noop() && !options.backup_on_noop {
            log::info!("新增・變更なし、主檔は変更しません");
            return Ok(ApplyOutcome {
                merged,
                report: self.report,
                backup: None,
                written: false,
            });
        }

        let backup = store.backup(now)?;
        store.save(&merged)?;

        Ok(ApplyOutcome {
            merged,
            report: self.report,
            backup,
            written: true,
        })
    }
}

/// 更新檔を主檔に適用（現在時刻でバックアップ）
pub fn apply(store: &RecordStore, incoming_path: &Path, options: UpsertOptions) -> Result<ApplyOutcome> {
    preview(store, incoming_path)?.apply(store, options, &Local::now())
}
