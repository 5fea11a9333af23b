//! 產品レコードの型定義
//!
//! 主檔・更新檔の1行を表す。欄位名は原ファイルのロケール（繁体字）を正とし、
//! 英語名は読み込み時の別名としてのみ受け付ける。

use serde::{Deserialize, Serialize};

/// 產品レコード（欠損値は空文字）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub category: String,   // 類別
    pub model: String,      // 型號（識別欄位）
    pub spec: String,       // 規格
    pub material: String,   // 材質
    pub image_path: String, // 圖片路徑
}

/// 必須欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Category,
    Model,
    Spec,
    Material,
    ImagePath,
}

/// ファイル上の列順
pub const REQUIRED_COLUMNS: [Column; 5] = [
    Column::Category,
    Column::Model,
    Column::Spec,
    Column::Material,
    Column::ImagePath,
];

/// 差分比較に使う欄位（型號は正規化キーで照合済みのため含めない）
pub const COMPARED_COLUMNS: [Column; 4] = [
    Column::Category,
    Column::Spec,
    Column::Material,
    Column::ImagePath,
];

impl Column {
    /// 書き出し時のヘッダー名
    pub fn header(self) -> &'static str {
        match self {
            Column::Category => "類別",
            Column::Model => "型號",
            Column::Spec => "規格",
            Column::Material => "材質",
            Column::ImagePath => "圖片路徑",
        }
    }

    /// 英語の別名
    pub fn alias(self) -> &'static str {
        match self {
            Column::Category => "Category",
            Column::Model => "Model",
            Column::Spec => "Spec",
            Column::Material => "Material",
            Column::ImagePath => "ImagePath",
        }
    }

    /// ヘッダー文字列から欄位を判定
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        REQUIRED_COLUMNS.iter().copied().find(|col| {
            header == col.header() || header.eq_ignore_ascii_case(col.alias())
        })
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl Record {
    pub fn new(
        category: impl Into<String>,
        model: impl Into<String>,
        spec: impl Into<String>,
        material: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            model: model.into(),
            spec: spec.into(),
            material: material.into(),
            image_path: image_path.into(),
        }
    }

    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Category => &self.category,
            Column::Model => &self.model,
            Column::Spec => &self.spec,
            Column::Material => &self.material,
            Column::ImagePath => &self.image_path,
        }
    }

    pub fn set(&mut self, column: Column, value: String) {
        match column {
            Column::Category => self.category = value,
            Column::Model => self.model = value,
            Column::Spec => self.spec = value,
            Column::Material => self.material = value,
            Column::ImagePath => self.image_path = value,
        }
    }

    /// 正規化済みキー
    pub fn key(&self) -> String {
        crate::key::normalize(&self.model)
    }
}

/// ヘッダー行に不足している必須欄位を列順で返す
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<Column> {
    let present: Vec<Column> = headers
        .iter()
        .filter_map(|h| Column::from_header(h.as_ref()))
        .collect();

    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect()
}
