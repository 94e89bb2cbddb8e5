//! 货品単位の状態遷移
//!
//! 状態は数量の確定・跳过・不再使用の操作からのみ導出される:
//! - PENDING → COMPLETED: 数量確定、または不再使用
//! - PENDING → SKIPPED: 跳过（ORDERのみ、モード判定は session 側）
//! - SKIPPED → COMPLETED: 跳过後に数量を確定した場合
//!
//! PENDINGへ戻る遷移は存在しない。

use crate::error::{Error, Result};
use crate::types::{ItemStatus, ProductItem};
use regex::Regex;

/// 新規货品の规格デフォルト
pub const DEFAULT_NEW_SPEC: &str = "无规格";
/// 新規货品の单位デフォルト
pub const DEFAULT_NEW_UNIT: &str = "个";

/// 入力テキスト確定の判定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// 空入力（何も確定しない）
    Unchanged,
    /// 数値として解釈できない（何も確定しない）
    Rejected,
    /// 数量を確定してCOMPLETEDにする
    Committed(f64),
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// 信息有误の修正内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correction {
    pub name: String,
    pub spec: String,
    pub unit: String,
}

/// 追加货品の入力内容（数量はテキストのまま）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub spec: String,
    pub unit: String,
    pub quantity: String,
}

/// 先頭の10進数部分を数量として解釈
///
/// `"12.5kg"` → 12.5、`".5"` → 0.5、`"abc"` → None
pub fn parse_quantity(text: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref LEADING_DECIMAL: Regex =
            Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
    }

    let found = LEADING_DECIMAL.find(text.trim())?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 入力テキストを確定した場合の結果を判定（副作用なし）
pub fn plan_commit(staged: &str) -> CommitOutcome {
    if staged.trim().is_empty() {
        return CommitOutcome::Unchanged;
    }

    match parse_quantity(staged) {
        Some(value) => CommitOutcome::Committed(value),
        None => CommitOutcome::Rejected,
    }
}

/// 入力テキストを確定
pub fn commit_staged(item: &mut ProductItem, staged: &str) -> CommitOutcome {
    let outcome = plan_commit(staged);

    match outcome {
        CommitOutcome::Committed(value) => {
            item.quantity = Some(value);
            item.status = ItemStatus::Completed;
            tracing::debug!(id = %item.id, quantity = value, "quantity committed");
        }
        CommitOutcome::Rejected => {
            tracing::debug!(id = %item.id, staged, "staged quantity is not numeric");
        }
        CommitOutcome::Unchanged => {}
    }

    outcome
}

/// 跳过（无需订货）
pub fn skip(item: &mut ProductItem) {
    item.status = ItemStatus::Skipped;
    item.quantity = Some(0.0);
    tracing::debug!(id = %item.id, "item skipped");
}

/// 不再使用を切り替え、新しい値を返す
///
/// ON にした時のみ数量0・COMPLETEDに固定する。OFF では数量と状態を戻さない。
pub fn toggle_unused(item: &mut ProductItem) -> bool {
    item.is_unused = !item.is_unused;

    if item.is_unused {
        item.quantity = Some(0.0);
        item.status = ItemStatus::Completed;
    }

    tracing::debug!(id = %item.id, unused = item.is_unused, "unused toggled");
    item.is_unused
}

/// 名称・规格・单位を修正
///
/// 修正前の値は初回のみ保存する。
pub fn correct(item: &mut ProductItem, correction: Correction) {
    if item.original_name.is_none() {
        item.original_name = Some(item.name.clone());
    }
    if item.original_spec.is_none() {
        item.original_spec = Some(item.spec.clone());
    }
    if item.original_unit.is_none() {
        item.original_unit = Some(item.unit.clone());
    }

    item.name = correction.name;
    item.spec = correction.spec;
    item.unit = correction.unit;
    item.has_error = true;

    tracing::debug!(id = %item.id, name = %item.name, "item corrected");
}

/// 追加货品を作成（数量が解釈できなければ0）
pub fn new_item(id: String, input: NewItem) -> Result<ProductItem> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::MissingName);
    }

    let spec = match input.spec.trim() {
        "" => DEFAULT_NEW_SPEC,
        s => s,
    };
    let unit = match input.unit.trim() {
        "" => DEFAULT_NEW_UNIT,
        u => u,
    };

    Ok(ProductItem {
        id,
        name: name.to_string(),
        spec: spec.to_string(),
        unit: unit.to_string(),
        quantity: Some(parse_quantity(&input.quantity).unwrap_or(0.0)),
        status: ItemStatus::Completed,
        is_unused: false,
        has_error: false,
        is_new: true,
        original_name: None,
        original_spec: None,
        original_unit: None,
    })
}
