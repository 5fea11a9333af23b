//! Excel出力（絞り込み結果を主檔と同じ欄位構成で書き出す）

use crate::error::Result;
use crate::store::xlsx;
use catalog_common::Record;
use std::path::Path;

pub fn generate_excel(records: &[&Record], output_path: &Path) -> Result<()> {
    let buffer = xlsx::write_buffer(records.iter().copied())?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
