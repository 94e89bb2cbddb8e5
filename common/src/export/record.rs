//! セッション → 表形式レコード
//!
//! 1货品1行。行順は清单順（序号は1始まり）。

use crate::session::Session;
use crate::types::{format_quantity, ItemStatus, Mode, ProductItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 跳过した货品の数量欄
pub const SKIP_MARKER: &str = "无需订货";
/// シート名
pub const SHEET_NAME: &str = "清单";

const NOTE_NEW: &str = "新增";
const NOTE_UNUSED: &str = "不再使用";
const NOTE_CORRECTED: &str = "信息有误(已修正)";
const NOTE_SEPARATOR: &str = ", ";

/// 出力レイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// 见出し行 + 货品行のみ
    #[default]
    Flat,
    /// 门店・操作员などのメタ情報行を先頭に付ける
    WithHeader,
}

impl FromStr for ExportLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" | "table" => Ok(ExportLayout::Flat),
            "header" | "with_header" | "with-header" => Ok(ExportLayout::WithHeader),
            _ => Err(format!("Unknown layout: {}. Use flat or header", s)),
        }
    }
}

impl fmt::Display for ExportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportLayout::Flat => write!(f, "flat"),
            ExportLayout::WithHeader => write!(f, "header"),
        }
    }
}

/// 货品1行分
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub seq: usize,
    pub name: String,
    pub spec: String,
    pub unit: String,
    pub quantity: String,
    pub notes: String,
    pub original_name: String,
    pub original_spec: String,
}

impl ExportRow {
    pub fn from_item(seq: usize, item: &ProductItem) -> Self {
        Self {
            seq,
            name: item.name().to_string(),
            spec: item.spec().to_string(),
            unit: item.unit().to_string(),
            quantity: quantity_cell(item),
            notes: notes_cell(item),
            original_name: item.original_name().unwrap_or_default().to_string(),
            original_spec: item.original_spec().unwrap_or_default().to_string(),
        }
    }

    /// 见出しと同じ並びのセル値（序号以外は文字列）
    pub fn text_cells(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.spec.as_str(),
            self.unit.as_str(),
            self.quantity.as_str(),
            self.notes.as_str(),
            self.original_name.as_str(),
            self.original_spec.as_str(),
        ]
    }
}

fn quantity_cell(item: &ProductItem) -> String {
    match item.status() {
        ItemStatus::Skipped => SKIP_MARKER.to_string(),
        ItemStatus::Pending | ItemStatus::Completed => item
            .quantity()
            .map(format_quantity)
            .unwrap_or_else(|| "0".to_string()),
    }
}

// 新增 → 不再使用 → 已修正 の順
fn notes_cell(item: &ProductItem) -> String {
    let mut notes = Vec::new();
    if item.is_new() {
        notes.push(NOTE_NEW);
    }
    if item.is_unused() {
        notes.push(NOTE_UNUSED);
    }
    if item.has_error() {
        notes.push(NOTE_CORRECTED);
    }
    notes.join(NOTE_SEPARATOR)
}

/// 表形式レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    /// (ラベル, 値) のメタ情報行。Flat では空
    pub metadata: Vec<(String, String)>,
    pub headers: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportRecord {
    /// 见出し行の行番号（0始まり）。メタ情報の後に空行を1行挟む
    pub fn header_row(&self) -> usize {
        if self.metadata.is_empty() {
            0
        } else {
            self.metadata.len() + 1
        }
    }
}

/// 列见出し
pub fn headers(mode: Mode) -> Vec<String> {
    [
        "序号",
        "货品名称",
        "规格",
        "单位",
        mode.quantity_column(),
        "备注",
        "原始名称",
        "原始规格",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect()
}

/// 货品行を作成
pub fn build_rows(items: &[ProductItem]) -> Vec<ExportRow> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| ExportRow::from_item(i + 1, item))
        .collect()
}

/// セッションからレコードを作成
pub fn build_record(session: &Session, layout: ExportLayout) -> ExportRecord {
    let metadata = match layout {
        ExportLayout::Flat => Vec::new(),
        ExportLayout::WithHeader => vec![
            ("门店".to_string(), session.store_name().to_string()),
            ("操作员".to_string(), session.operator().username.clone()),
            ("单据类型".to_string(), session.mode().document_label().to_string()),
            (
                "开始时间".to_string(),
                session.start_time().format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        ],
    };

    ExportRecord {
        metadata,
        headers: headers(session.mode()),
        rows: build_rows(session.items()),
    }
}

/// 出力ファイル名: `{门店}_{单据类型}_{操作员}_{日付}.xlsx`
pub fn file_name(session: &Session, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}_{}.xlsx",
        session.store_name(),
        session.mode().document_label(),
        session.operator().username,
        date.format("%Y-%m-%d")
    )
}

/// 共有時の添え書き
pub fn share_caption(session: &Session) -> String {
    format!(
        "这是 {} 的{}，请查收。",
        session.store_name(),
        session.mode().document_label()
    )
}
