//! セッションの型定義
//!
//! CLIと将来の別フロントエンドで共有される型:
//! - Mode: 盘点（在庫カウント）/ 订货（発注）
//! - ItemStatus: 货品の処理状態
//! - ProductItem: セッション中の货品1行
//! - Operator / SourceItem: 外部から受け取るデータ

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 作業モード（セッション中は固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// 盘点
    Count,
    /// 订货
    Order,
}

impl Mode {
    /// 画面ヘッダー用のシステム名
    pub fn system_label(&self) -> &'static str {
        match self {
            Mode::Count => "盘点系统",
            Mode::Order => "订货系统",
        }
    }

    /// 単据種別（ファイル名・メタ情報に使用）
    pub fn document_label(&self) -> &'static str {
        match self {
            Mode::Count => "盘点单",
            Mode::Order => "订货单",
        }
    }

    /// エクスポートの数量列ヘッダー
    pub fn quantity_column(&self) -> &'static str {
        match self {
            Mode::Count => "盘点数量",
            Mode::Order => "订货数量",
        }
    }

    /// 処理済み一覧のラベル
    pub fn processed_label(&self) -> &'static str {
        match self {
            Mode::Count => "已点",
            Mode::Order => "已订",
        }
    }

    /// 未処理一覧のラベル
    pub fn pending_label(&self) -> &'static str {
        match self {
            Mode::Count => "待点",
            Mode::Order => "待订",
        }
    }

    /// 終了ボタンの文言
    pub fn finish_label(&self) -> &'static str {
        match self {
            Mode::Count => "结束盘点",
            Mode::Order => "结束订货",
        }
    }

    /// 跳过（无需订货）が使えるか
    pub fn allows_skip(&self) -> bool {
        match self {
            Mode::Count => false,
            Mode::Order => true,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Count => write!(f, "COUNT"),
            Mode::Order => write!(f, "ORDER"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" | "c" | "盘点" => Ok(Mode::Count),
            "order" | "o" | "订货" => Ok(Mode::Order),
            _ => Err(format!("Unknown mode: {}. Use count or order", s)),
        }
    }
}

/// 货品の処理状態
///
/// 数量の確定・跳过・不再使用の操作からのみ導出される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// 未処理
    Pending,
    /// 数量確定済み、または不再使用
    Completed,
    /// 无需订货（ORDERのみ）
    Skipped,
}

impl ItemStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ItemStatus::Pending)
    }
}

/// ログイン済みの操作員
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub username: String,
    /// 货品清单のシート名と一致する
    pub store_name: String,
}

/// 货品ソースから受け取る1行（名称・规格・单位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub name: String,
    pub spec: String,
    pub unit: String,
}

impl SourceItem {
    pub fn new(name: impl Into<String>, spec: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: spec.into(),
            unit: unit.into(),
        }
    }
}

/// セッション中の货品
///
/// 状態系のフィールドは `mutation` 経由でのみ変更される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) spec: String,
    pub(crate) unit: String,

    pub(crate) quantity: Option<f64>,
    pub(crate) status: ItemStatus,

    pub(crate) is_unused: bool,   // 不再使用
    pub(crate) has_error: bool,   // 信息有误
    pub(crate) is_new: bool,      // 新增货品

    // 初回修正時の値
    pub(crate) original_name: Option<String>,
    pub(crate) original_spec: Option<String>,
    pub(crate) original_unit: Option<String>,
}

impl ProductItem {
    /// ソース行から未処理の货品を作成
    pub fn from_source(index: usize, source: SourceItem) -> Self {
        Self {
            id: format!("item-{}", index),
            name: source.name,
            spec: source.spec,
            unit: source.unit,
            quantity: None,
            status: ItemStatus::Pending,
            is_unused: false,
            has_error: false,
            is_new: false,
            original_name: None,
            original_spec: None,
            original_unit: None,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn spec(&self) -> &str { &self.spec }
    pub fn unit(&self) -> &str { &self.unit }
    pub fn quantity(&self) -> Option<f64> { self.quantity }
    pub fn status(&self) -> ItemStatus { self.status }
    pub fn is_unused(&self) -> bool { self.is_unused }
    pub fn has_error(&self) -> bool { self.has_error }
    pub fn is_new(&self) -> bool { self.is_new }
    pub fn original_name(&self) -> Option<&str> { self.original_name.as_deref() }
    pub fn original_spec(&self) -> Option<&str> { self.original_spec.as_deref() }
    pub fn original_unit(&self) -> Option<&str> { self.original_unit.as_deref() }

    /// 数量の表示用文字列（未確定なら None）
    pub fn quantity_text(&self) -> Option<String> {
        self.quantity.map(format_quantity)
    }
}

/// 数量を10進文字列に整形（整数値は小数点なし）
pub fn format_quantity(value: f64) -> String {
    format!("{}", value)
}

/// 処理進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(items: &[ProductItem]) -> Self {
        Self {
            completed: items.iter().filter(|i| !i.status.is_pending()).count(),
            total: items.len(),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// 0.0〜1.0
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}
