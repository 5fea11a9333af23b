//! 一覧フィルタ
//!
//! キーワード検索・類別/材質の絞り込み・表示モード（全部/新增/變更）。
//! 表示モードは呼び出し側から渡される `DiffReport` を参照する。

use crate::diff::DiffReport;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 表示モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    New,
    Updated,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "全部" => Ok(ViewMode::All),
            "new" | "新增" => Ok(ViewMode::New),
            "updated" | "更新" => Ok(ViewMode::Updated),
            _ => Err(format!("Unknown view: {}. Use all, new, or updated", s)),
        }
    }
}

/// 一覧の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// キーワード（型號/規格/材質など全欄位、大小文字無視）
    pub query: String,
    /// 類別（空なら全て）
    pub categories: Vec<String>,
    /// 材質（空なら全て）
    pub materials: Vec<String>,
    pub view: ViewMode,
}

impl CatalogFilter {
    /// 条件に合うレコードを元の順序で返す
    pub fn apply<'a>(&self, records: &'a [Record], report: Option<&DiffReport>) -> Vec<&'a Record> {
        let query = self.query.trim().to_lowercase();

        // 対象キーが空なら表示モードは無視（全件表示）
        let view_keys: Option<&[String]> = match (self.view, report) {
            (ViewMode::New, Some(r)) if !r.inserted.is_empty() => Some(&r.inserted),
            (ViewMode::Updated, Some(r)) if !r.updated.is_empty() => Some(&r.updated),
            _ => None,
        };

        records
            .iter()
            .filter(|r| query.is_empty() || matches_query(r, &query))
            .filter(|r| self.categories.is_empty() || self.categories.contains(&r.category))
            .filter(|r| self.materials.is_empty() || self.materials.contains(&r.material))
            .filter(|r| view_keys.map_or(true, |keys| keys.contains(&r.key())))
            .collect()
    }
}

fn matches_query(record: &Record, query_lower: &str) -> bool {
    let haystack = [
        record.category.as_str(),
        record.model.as_str(),
        record.spec.as_str(),
        record.material.as_str(),
        record.image_path.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    haystack.contains(query_lower)
}

/// 類別の選択肢（重複除去・辞書順）
pub fn distinct_categories(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 材質の選択肢（重複除去・辞書順）
pub fn distinct_materials(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.material.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
