//! xlsx読み書き
//!
//! 読み込みは calamine、書き出しは rust_xlsxwriter。
//! 先頭シートの1行目をヘッダーとして扱う。

use crate::error::{CatalogError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use catalog_common::{missing_columns, Column, Record, REQUIRED_COLUMNS};
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashMap;
use std::path::Path;

/// 読み込んだシート
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Sheet {
    /// ヘッダーに無い必須欄位
    pub fn missing_columns(&self) -> Vec<Column> {
        missing_columns(&self.headers)
    }
}

/// セル値を文字列化（空セルは空文字、整数値の小数は整数表記）
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// 先頭シートを読み込み
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CatalogError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range
            .map_err(|e| CatalogError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?,
        None => return Ok(Sheet::default()),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        None => return Ok(Sheet::default()),
    };

    // 欄位 → 列番号（同名ヘッダーは先勝ち）
    let mut column_index: HashMap<Column, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(col) = Column::from_header(header) {
            column_index.entry(col).or_insert(idx);
        }
    }

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|c| cell_to_string(c).is_empty()) {
            continue;
        }

        let mut record = Record::default();
        for (&col, &idx) in &column_index {
            let value = row.get(idx).map(cell_to_string).unwrap_or_default();
            record.set(col, value);
        }
        records.push(record);
    }

    log::debug!(
        "{}: {}行読み込み（ヘッダー: {:?}）",
        path.display(),
        records.len(),
        headers
    );

    Ok(Sheet { headers, records })
}

/// レコードをxlsxバイト列に変換（ヘッダーは原ロケール名）
pub fn write_buffer<'a>(records: impl IntoIterator<Item = &'a Record>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();

    for (col_idx, col) in REQUIRED_COLUMNS.iter().enumerate() {
        let col_idx = col_idx as u16;
        worksheet
            .write_string_with_format(0, col_idx, col.header(), &header_format)
            .map_err(|e| CatalogError::SpreadsheetWrite(format!("ヘッダー書き込みエラー: {}", e)))?;
        worksheet
            .set_column_width(col_idx, column_width(*col))
            .map_err(|e| CatalogError::SpreadsheetWrite(format!("列幅設定エラー: {}", e)))?;
    }

    for (row_idx, record) in records.into_iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, col) in REQUIRED_COLUMNS.iter().enumerate() {
            let value = record.get(*col);
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row, col_idx as u16, value)
                .map_err(|e| CatalogError::SpreadsheetWrite(format!("値書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| CatalogError::SpreadsheetWrite(format!("Excel保存エラー: {}", e)))
}

fn column_width(col: Column) -> f64 {
    match col {
        Column::Category => 12.0,
        Column::Model => 16.0,
        Column::Spec => 24.0,
        Column::Material => 14.0,
        Column::ImagePath => 32.0,
    }
}
