//! 差分判定
//!
//! 更新檔の各キーを「新增 / 變更 / 相同」に分類する。
//! 結果は `DiffReport` として呼び出し側に返し、一覧の表示モード等へ
//! そのまま引き渡す（グローバル状態は持たない）。
//!
//! 同一キーが複数行ある場合の代表行:
//! - 主檔側: 最初の行
//! - 更新檔側: 最後の行（マージで最終的に残る行）

use crate::record::{Column, Record};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 差分結果（キーは正規化済み、辞書順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub inserted: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
}

/// 件数サマリ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl DiffReport {
    pub fn counts(&self) -> DiffCounts {
        DiffCounts {
            inserted: self.inserted.len(),
            updated: self.updated.len(),
            unchanged: self.unchanged.len(),
        }
    }

    /// 新增・變更が無い
    pub fn is_noop(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty()
    }

    pub fn is_inserted(&self, key: &str) -> bool {
        self.inserted.iter().any(|k| k == key)
    }

    pub fn is_updated(&self, key: &str) -> bool {
        self.updated.iter().any(|k| k == key)
    }

    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let report: Self = serde_json::from_str(json)?;
        Ok(report)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 主檔と更新檔の差分を計算
pub fn diff(master: &[Record], incoming: &[Record], fields: &[Column]) -> DiffReport {
    let mut master_by_key: HashMap<String, &Record> = HashMap::new();
    for record in master {
        master_by_key.entry(record.key()).or_insert(record);
    }

    let mut incoming_by_key: HashMap<String, &Record> = HashMap::new();
    for record in incoming {
        incoming_by_key.insert(record.key(), record);
    }

    let mut inserted = BTreeSet::new();
    let mut updated = BTreeSet::new();
    let mut unchanged = BTreeSet::new();

    for (key, new_row) in incoming_by_key {
        match master_by_key.get(&key) {
            None => {
                inserted.insert(key);
            }
            Some(old_row) => {
                let changed = fields
                    .iter()
                    .any(|&col| old_row.get(col) != new_row.get(col));
                if changed {
                    updated.insert(key);
                } else {
                    unchanged.insert(key);
                }
            }
        }
    }

    DiffReport {
        inserted: inserted.into_iter().collect(),
        updated: updated.into_iter().collect(),
        unchanged: unchanged.into_iter().collect(),
    }
}
