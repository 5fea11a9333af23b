use catalog_common::error::join_columns;
use catalog_common::Column;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("更新檔缺少欄位: {}", join_columns(.0))]
    MissingColumns(Vec<Column>),

    #[error("Excel読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("Excel保存エラー: {0}")]
    SpreadsheetWrite(String),

    #[error("バックアップ作成エラー: {0}")]
    Backup(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("操作を中止しました")]
    Aborted,
}

impl From<catalog_common::Error> for CatalogError {
    fn from(err: catalog_common::Error) -> Self {
        match err {
            catalog_common::Error::Io(e) => CatalogError::Io(e),
            catalog_common::Error::Json(e) => CatalogError::JsonParse(e),
            catalog_common::Error::Config(msg) => CatalogError::Config(msg),
            catalog_common::Error::MissingColumns(cols) => CatalogError::MissingColumns(cols),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
