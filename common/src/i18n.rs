//! 表示ラベル（中文 / English）

use serde::{Deserialize, Serialize};

/// 表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

/// ラベル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Model,
    Spec,
    Material,
    Category,
    ListHeader,
    PdfHeaderMain,
    PdfHeaderSub,
    PdfNoImage,
    MissingColumns,
    DiffCounts,
    BackupCreated,
    UpdateDone,
    MasterNotFound,
}

impl Lang {
    pub fn text(self, label: Label) -> &'static str {
        use Label::*;
        match (self, label) {
            (Lang::Zh, Model) => "型號",
            (Lang::En, Model) => "Model",
            (Lang::Zh, Spec) => "規格",
            (Lang::En, Spec) => "Spec",
            (Lang::Zh, Material) => "材質",
            (Lang::En, Material) => "Material",
            (Lang::Zh, Category) => "類別",
            (Lang::En, Category) => "Category",
            (Lang::Zh, ListHeader) => "產品列表（{n} 筆）",
            (Lang::En, ListHeader) => "Product List ({n} items)",
            (Lang::Zh, PdfHeaderMain) => "淇錩科技有限公司 產品型錄",
            (Lang::En, PdfHeaderMain) => "Qichang Technology Product Catalog",
            (Lang::Zh, PdfHeaderSub) => "（內容由 Excel 匯入，可即時更新）",
            (Lang::En, PdfHeaderSub) => "(Content imported from Excel, updates in real time)",
            (Lang::Zh, PdfNoImage) => "無圖片",
            (Lang::En, PdfNoImage) => "No Image",
            (Lang::Zh, MissingColumns) => "更新檔缺少欄位：",
            (Lang::En, MissingColumns) => "Missing columns in update file: ",
            (Lang::Zh, DiffCounts) => "新增：{a} 筆，變更：{b} 筆，相同：{c} 筆",
            (Lang::En, DiffCounts) => "New: {a}  | Updated: {b}  | Unchanged: {c}",
            (Lang::Zh, BackupCreated) => "已自動備份：",
            (Lang::En, BackupCreated) => "Backup created: ",
            (Lang::Zh, UpdateDone) => "更新完成！",
            (Lang::En, UpdateDone) => "Update completed!",
            (Lang::Zh, MasterNotFound) => "找不到 {f}，以空白清單繼續。",
            (Lang::En, MasterNotFound) => "Cannot find {f}. Continuing with an empty list.",
        }
    }

    /// 欄位ラベルと値の区切り
    pub fn separator(self) -> &'static str {
        match self {
            Lang::Zh => "：",
            Lang::En => ": ",
        }
    }

    /// PDFの既定ファイル名（拡張子なし）
    pub fn catalog_file_stem(self) -> &'static str {
        match self {
            Lang::Zh => "產品型錄",
            Lang::En => "Catalog",
        }
    }

    /// 一覧見出し
    pub fn list_header(self, n: usize) -> String {
        self.text(Label::ListHeader).replace("{n}", &n.to_string())
    }

    /// 差分件数
    pub fn diff_counts(self, inserted: usize, updated: usize, unchanged: usize) -> String {
        self.text(Label::DiffCounts)
            .replace("{a}", &inserted.to_string())
            .replace("{b}", &updated.to_string())
            .replace("{c}", &unchanged.to_string())
    }

    /// 「ラベル：値」形式
    pub fn field_line(self, label: Label, value: &str) -> String {
        format!("{}{}{}", self.text(label), self.separator(), value)
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" | "中文" | "zh-tw" => Ok(Lang::Zh),
            "en" | "english" => Ok(Lang::En),
            _ => Err(format!("Unknown language: {}. Use zh or en", s)),
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lang::Zh => write!(f, "zh"),
            Lang::En => write!(f, "en"),
        }
    }
}
