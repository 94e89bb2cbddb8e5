//! 货品清单ソース
//!
//! - xlsx/xls/ods: 门店名と同名のシート、1行目が见出し
//! - json: `{ "门店名": [ {"name", "spec", "unit"}, ... ] }`
//!
//! どの失敗でもデモ用の清单に差し替え、空の清单は返さない。

use crate::error::{StocktakeError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use stocktake_common::SourceItem;

const NAME_KEYS: &[&str] = &["货品名称", "name"];
const SPEC_KEYS: &[&str] = &["规格", "spec"];
const UNIT_KEYS: &[&str] = &["点货单位", "单位", "unit"];

const DEFAULT_NAME: &str = "未知商品";
const DEFAULT_UNIT: &str = "个";

/// 清单の出どころ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOrigin {
    File(PathBuf),
    /// デモ用清单（理由付き）
    Fallback(String),
}

#[derive(Debug, Clone)]
pub struct LoadedItems {
    pub items: Vec<SourceItem>,
    pub origin: ItemOrigin,
}

impl LoadedItems {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ItemOrigin::Fallback(_))
    }
}

/// 门店の货品清单を読み込み（失敗時はデモ用）
pub async fn fetch_products(path: Option<&Path>, store_name: &str) -> LoadedItems {
    let Some(path) = path else {
        return fallback(store_name, "未配置货品清单".to_string());
    };

    let owned_path = path.to_path_buf();
    let owned_store = store_name.to_string();
    let result = tokio::task::spawn_blocking(move || read_products(&owned_path, &owned_store))
        .await
        .map_err(|e| StocktakeError::SourceUnavailable(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(items) if !items.is_empty() => LoadedItems {
            items,
            origin: ItemOrigin::File(path.to_path_buf()),
        },
        Ok(_) => {
            tracing::warn!(store = store_name, path = %path.display(), "store has no items, using built-in items");
            fallback(store_name, format!("{} 没有货品", store_name))
        }
        Err(e) => {
            tracing::warn!(store = store_name, path = %path.display(), error = %e, "failed to load items, using built-in items");
            fallback(store_name, e.to_string())
        }
    }
}

/// ファイル形式を拡張子で判定して読み込み
pub fn read_products(path: &Path, store_name: &str) -> Result<Vec<SourceItem>> {
    if !path.exists() {
        return Err(StocktakeError::SourceUnavailable(path.display().to_string()));
    }

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        read_json_products(path, store_name)
    } else {
        read_workbook_products(path, store_name)
    }
}

fn read_workbook_products(path: &Path, store_name: &str) -> Result<Vec<SourceItem>> {
    let mut workbook = open_workbook_auto(path)?;

    if !workbook.sheet_names().iter().any(|n| n == store_name) {
        return Err(StocktakeError::SheetNotFound(store_name.to_string()));
    }

    let range = workbook.worksheet_range(store_name)?;
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let items = rows
        .map(|row| {
            headers
                .iter()
                .zip(row.iter().map(cell_text))
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, v)| (h.clone(), v))
                .collect::<HashMap<String, String>>()
        })
        .filter(|raw| raw.values().any(|v| !v.is_empty()))
        .map(|raw| normalize_row(&raw))
        .collect();

    Ok(items)
}

fn read_json_products(path: &Path, store_name: &str) -> Result<Vec<SourceItem>> {
    let content = std::fs::read_to_string(path)?;
    let stores: BTreeMap<String, Vec<serde_json::Map<String, serde_json::Value>>> =
        serde_json::from_str(&content)?;

    let rows = stores
        .get(store_name)
        .ok_or_else(|| StocktakeError::SheetNotFound(store_name.to_string()))?;

    let items = rows
        .iter()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| json_text(v).map(|s| (k.clone(), s)))
                .collect::<HashMap<String, String>>()
        })
        .map(|raw| normalize_row(&raw))
        .collect();

    Ok(items)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 见出しの別名を順に見て、最初の空でない値を使う
fn pick(raw: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| raw.get(*k))
        .find(|v| !v.is_empty())
        .cloned()
}

fn normalize_row(raw: &HashMap<String, String>) -> SourceItem {
    SourceItem {
        name: pick(raw, NAME_KEYS).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        spec: pick(raw, SPEC_KEYS).unwrap_or_default(),
        unit: pick(raw, UNIT_KEYS).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
    }
}

/// デモ用清单
pub fn default_items(store_name: &str) -> Vec<SourceItem> {
    if store_name.contains("五道口") {
        vec![
            SourceItem::new("原味奶酪", "200g/碗", "碗"),
            SourceItem::new("草莓果酱", "5kg/桶", "桶"),
            SourceItem::new("一次性勺子", "100支/包", "包"),
            SourceItem::new("打包袋", "50个/捆", "捆"),
            SourceItem::new("全脂牛奶", "1L/盒", "盒"),
        ]
    } else {
        vec![
            SourceItem::new("希腊酸奶", "150g/杯", "杯"),
            SourceItem::new("蓝莓", "125g/盒", "盒"),
            SourceItem::new("格兰诺拉麦片", "1kg/袋", "袋"),
            SourceItem::new("蜂蜜", "500g/瓶", "瓶"),
        ]
    }
}

fn fallback(store_name: &str, reason: String) -> LoadedItems {
    LoadedItems {
        items: default_items(store_name),
        origin: ItemOrigin::Fallback(reason),
    }
}
