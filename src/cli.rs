use catalog_common::{CatalogFilter, Lang, ViewMode};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "產品目錄ツール：一覧・PDF型錄・差分プレビュー付き一括更新", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 主檔Excel（省略時は設定値）
    #[arg(short, long, global = true)]
    pub master: Option<PathBuf>,

    /// 表示言語 (zh/en)
    #[arg(long, global = true)]
    pub lang: Option<Lang>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 產品一覧を表示
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// 絞り込み結果をPDF/Excelに出力
    Export {
        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (pdf/excel/both)
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// PDF画像品質 (high/medium/low)
        #[arg(long)]
        pdf_quality: Option<PdfQuality>,

        /// 埋め込みフォント（TTF/OTF）
        #[arg(long)]
        font: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// 更新檔との差分をプレビュー（主檔は変更しない）
    Diff {
        /// 更新檔Excel
        #[arg(required = true)]
        incoming: PathBuf,

        /// 差分結果JSONの保存先
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// 更新檔を主檔に適用（バックアップ後に上書き）
    Apply {
        /// 更新檔Excel
        #[arg(required = true)]
        incoming: PathBuf,

        /// 確認せずに適用
        #[arg(short, long)]
        yes: bool,

        /// 差分結果JSONの保存先
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// 新增・變更が0件でもバックアップを作る (true/false)
        #[arg(long)]
        backup_on_noop: Option<bool>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 主檔パスを設定
        #[arg(long)]
        set_master: Option<PathBuf>,

        /// 表示言語を設定
        #[arg(long)]
        set_lang: Option<Lang>,

        /// 0件更新時のバックアップ有無を設定
        #[arg(long)]
        set_backup_on_noop: Option<bool>,

        /// PDF画像品質を設定
        #[arg(long)]
        set_pdf_quality: Option<PdfQuality>,

        /// PDF埋め込みフォントを設定
        #[arg(long)]
        set_font: Option<PathBuf>,
    },
}

/// 一覧・出力共通の絞り込み条件
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// キーワード（型號/規格/材質）
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// 類別（複数指定可）
    #[arg(short, long)]
    pub category: Vec<String>,

    /// 材質（複数指定可）
    #[arg(long)]
    pub material: Vec<String>,

    /// 表示モード (all/new/updated)
    #[arg(long, default_value = "all")]
    pub view: ViewMode,

    /// 表示モードで参照する差分結果JSON
    #[arg(long)]
    pub diff_report: Option<PathBuf>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> CatalogFilter {
        CatalogFilter {
            query: self.query.clone(),
            categories: self.category.clone(),
            materials: self.material.clone(),
            view: self.view,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, excel, or both", s)),
        }
    }
}

/// PDF画像品質設定
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfQuality {
    /// 高品質: 1400px, 85%
    High,
    /// 中品質: 800px, 75%（デフォルト）
    #[default]
    Medium,
    /// 低品質: 500px, 60%
    Low,
}

impl PdfQuality {
    /// 最大ピクセル幅
    pub fn max_width(&self) -> u32 {
        match self {
            PdfQuality::High => 1400,
            PdfQuality::Medium => 800,
            PdfQuality::Low => 500,
        }
    }

    /// JPEG品質 (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PdfQuality::High => 85,
            PdfQuality::Medium => 75,
            PdfQuality::Low => 60,
        }
    }
}

impl std::str::FromStr for PdfQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Ok(PdfQuality::High),
            "medium" | "med" | "m" => Ok(PdfQuality::Medium),
            "low" | "l" => Ok(PdfQuality::Low),
            _ => Err(format!("Unknown quality: {}. Use high, medium, or low", s)),
        }
    }
}

impl std::fmt::Display for PdfQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfQuality::High => write!(f, "high"),
            PdfQuality::Medium => write!(f, "medium"),
            PdfQuality::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from(["catalog", "--lang", "en", "apply", "up.xlsx", "--yes"])
            .expect("引数解析失敗");
        assert_eq!(cli.lang, Some(Lang::En));
        match cli.command {
            Commands::Apply { incoming, yes, backup_on_noop, .. } => {
                assert_eq!(incoming, PathBuf::from("up.xlsx"));
                assert!(yes);
                assert!(backup_on_noop.is_none());
            }
            _ => panic!("applyとして解析されていない"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "catalog", "list", "-q", "qc", "-c", "螺絲", "-c", "墊片", "--view", "new",
        ])
        .expect("引数解析失敗");
        match cli.command {
            Commands::List { filter } => {
                let filter = filter.to_filter();
                assert_eq!(filter.query, "qc");
                assert_eq!(filter.categories, vec!["螺絲", "墊片"]);
                assert_eq!(filter.view, ViewMode::New);
            }
            _ => panic!("listとして解析されていない"),
        }
    }

    #[test]
    fn test_quality_from_str() {
        assert!(matches!("H".parse::<PdfQuality>(), Ok(PdfQuality::High)));
        assert!("ultra".parse::<PdfQuality>().is_err());
        assert!(matches!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel)));
    }
}
