//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを作り、ファイルに書き出す

use crate::error::{StocktakeError, Result};
use std::path::Path;
use stocktake_common::export::excel_core::generate_excel_buffer;
use stocktake_common::ExportRecord;

pub fn generate_excel(record: &ExportRecord, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(record)
        .map_err(|e| StocktakeError::ExcelGeneration(e.to_string()))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, buffer)?;
    Ok(())
}
