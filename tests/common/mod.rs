//! テスト用xlsxフィクスチャ

#![allow(dead_code)]

use catalog_common::Record;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const HEADERS: [&str; 5] = ["類別", "型號", "規格", "材質", "圖片路徑"];

/// 任意のヘッダーと文字列行でxlsxを作成
pub fn write_xlsx(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (c, h) in headers.iter().enumerate() {
        worksheet.write_string(0, c as u16, *h).expect("ヘッダー書き込み失敗");
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32 + 1, c as u16, *value)
                    .expect("値書き込み失敗");
            }
        }
    }

    workbook.save(path).expect("xlsx保存失敗");
}

/// 必須欄位そろいのxlsxを作成
pub fn write_records(path: &Path, records: &[Record]) {
    let rows: Vec<Vec<&str>> = records
        .iter()
        .map(|r| {
            vec![
                r.category.as_str(),
                r.model.as_str(),
                r.spec.as_str(),
                r.material.as_str(),
                r.image_path.as_str(),
            ]
        })
        .collect();
    write_xlsx(path, &HEADERS, &rows);
}

pub fn rec(category: &str, model: &str, spec: &str, material: &str) -> Record {
    Record::new(category, model, spec, material, "")
}

/// ディレクトリ内のバックアップファイル（`<stem>_*.xlsx`）
pub fn backups(dir: &Path, stem: &str) -> Vec<std::path::PathBuf> {
    let prefix = format!("{}_", stem);
    let mut found: Vec<_> = std::fs::read_dir(dir)
        .expect("ディレクトリ読み込み失敗")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(&prefix))
                .unwrap_or(false)
        })
        .collect();
    found.sort();
    found
}
