//! エラー型定義

use crate::record::Column;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing columns: {}", join_columns(.0))]
    MissingColumns(Vec<Column>),
}

/// 欄位名を「、」区切りで連結
pub fn join_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.header())
        .collect::<Vec<_>>()
        .join("、")
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
