pub mod excel;

use crate::error::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use stocktake_common::export::{build_record, file_name, ExportLayout};
use stocktake_common::Session;

/// 今日の日付でセッションを書き出す
pub fn export_session(session: &Session, layout: ExportLayout, output_dir: &Path) -> Result<PathBuf> {
    export_session_on(session, layout, output_dir, Local::now().date_naive())
}

/// 日付を指定してセッションを書き出し、出力パスを返す
pub fn export_session_on(
    session: &Session,
    layout: ExportLayout,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    let record = build_record(session, layout);
    let output_path = output_dir.join(file_name(session, date));

    println!("- 正在生成Excel... (格式: {})", layout);
    excel::generate_excel(&record, &output_path)?;
    println!("✔ Excel已导出: {}", output_path.display());

    tracing::info!(path = %output_path.display(), rows = record.rows.len(), "session exported");
    Ok(output_path)
}
