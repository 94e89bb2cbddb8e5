//! Excel生成（共通ライブラリ）
//!
//! ExportRecord を1シートのxlsxに書き出す

use super::record::{ExportRecord, SHEET_NAME};
use crate::error::Result;
use rust_xlsxwriter::*;

const COLUMN_WIDTHS: [f64; 8] = [6.0, 24.0, 14.0, 8.0, 12.0, 24.0, 20.0, 14.0];

/// Excelをバッファに生成
pub fn generate_excel_buffer(record: &ExportRecord) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let label_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(Color::RGB(0xE8F5E9))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let cell_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    // メタ情報（ラベル:A列、値:B列）
    for (row, (label, value)) in record.metadata.iter().enumerate() {
        worksheet.write_string_with_format(row as u32, 0, label, &label_format)?;
        worksheet.write_string(row as u32, 1, value)?;
    }

    // 见出し
    let header_row = record.header_row() as u32;
    for (col, header) in record.headers.iter().enumerate() {
        worksheet.write_string_with_format(header_row, col as u16, header, &header_format)?;
    }
    worksheet.set_freeze_panes(header_row + 1, 0)?;

    // 货品行（序号のみ数値、他は文字列）
    for (i, item_row) in record.rows.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        worksheet.write_number_with_format(row, 0, item_row.seq as f64, &cell_format)?;

        for (offset, text) in item_row.text_cells().iter().enumerate() {
            worksheet.write_string_with_format(row, 1 + offset as u16, *text, &cell_format)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
