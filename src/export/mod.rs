pub mod pdf;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use catalog_common::Record;
use pdf::PdfOptions;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let pdf_path = output.join(format!("{}.pdf", stem));
        let excel_path = output.join(format!("{}.xlsx", stem));
        (pdf_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        let pdf_path = parent.join(format!("{}.pdf", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (pdf_path, excel_path)
    }
}

/// 絞り込み結果を出力し、書き出したファイルを返す
pub fn export_records(
    records: &[&Record],
    format: &ExportFormat,
    output: &Path,
    options: &PdfOptions,
) -> Result<Vec<PathBuf>> {
    let stem = options.lang.catalog_file_stem();
    let mut written = Vec::new();

    match format {
        ExportFormat::Pdf => {
            let output_path = output_path_for_format(output, stem, "pdf");
            println!("- PDFを生成中... (品質: {})", options.quality);
            pdf::generate_pdf(records, &output_path, options)?;
            println!("✔ PDF出力: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, stem, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(records, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Both => {
            let (pdf_path, excel_path) = output_paths_for_both(output, stem);

            println!("- PDFを生成中... (品質: {})", options.quality);
            pdf::generate_pdf(records, &pdf_path, options)?;
            println!("✔ PDF出力: {}", pdf_path.display());

            println!("- Excelを生成中...");
            excel::generate_excel(records, &excel_path)?;
            println!("✔ Excel出力: {}", excel_path.display());

            written.push(pdf_path);
            written.push(excel_path);
        }
    }

    Ok(written)
}
