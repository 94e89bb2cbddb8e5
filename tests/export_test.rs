//! Excel出力の統合テスト
//!
//! 書き出したxlsxを calamine で読み戻して検証する

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;
use std::path::Path;
use stocktake_common::export::{SHEET_NAME, SKIP_MARKER};
use stocktake_common::{Correction, ExportLayout, Mode, NewItem, Operator, Session, SourceItem};
use stocktake_rust::export;
use tempfile::tempdir;

fn create_session(mode: Mode) -> Session {
    let operator = Operator {
        username: "xzm_user".to_string(),
        store_name: "OMEGA酸奶（西直门店）".to_string(),
    };
    let source = vec![
        SourceItem::new("希腊酸奶", "150g/杯", "杯"),
        SourceItem::new("蓝莓", "125g/盒", "盒"),
        SourceItem::new("格兰诺拉麦片", "1kg/袋", "袋"),
        SourceItem::new("蜂蜜", "500g/瓶", "瓶"),
    ];
    Session::new(operator, mode, source).expect("セッション作成失敗")
}

fn read_sheet(path: &Path) -> Range<Data> {
    let mut workbook = open_workbook_auto(path).expect("xlsx読み込み失敗");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    workbook.worksheet_range(SHEET_NAME).expect("シートが見つからない")
}

fn cell(range: &Range<Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

#[test]
fn test_export_flat_order_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = create_session(Mode::Order);

    session.set_staged("12");
    session.next();
    session.skip().expect("跳过失敗");
    session.correct_current(Correction {
        name: "燕麦片".into(),
        spec: "1kg/袋".into(),
        unit: "袋".into(),
    });
    session.finish();

    let path = export::export_session_on(&session, ExportLayout::Flat, dir.path(), date())
        .expect("Excel出力失敗");

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("OMEGA酸奶（西直门店）_订货单_xzm_user_2026-03-02.xlsx")
    );
    assert!(path.exists(), "Excelファイルが作成されていない");

    let range = read_sheet(&path);
    // 见出し + 货品4行
    assert_eq!(range.get_size().0, 5);
    assert_eq!(cell(&range, 0, 0), "序号");
    assert_eq!(cell(&range, 0, 4), "订货数量");

    assert_eq!(cell(&range, 1, 0), "1");
    assert_eq!(cell(&range, 1, 1), "希腊酸奶");
    assert_eq!(cell(&range, 1, 4), "12");

    assert_eq!(cell(&range, 2, 4), SKIP_MARKER);

    assert_eq!(cell(&range, 3, 1), "燕麦片");
    assert_eq!(cell(&range, 3, 4), "0");
    assert_eq!(cell(&range, 3, 5), "信息有误(已修正)");
    assert_eq!(cell(&range, 3, 6), "格兰诺拉麦片");
    assert_eq!(cell(&range, 3, 7), "1kg/袋");

    assert_eq!(cell(&range, 4, 0), "4");
}

#[test]
fn test_export_with_header_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = create_session(Mode::Count);
    session.toggle_unused();
    session
        .append_item(NewItem { name: "蜂蜜柠檬".into(), quantity: "3".into(), ..Default::default() })
        .expect("追加失敗");

    let path = export::export_session_on(&session, ExportLayout::WithHeader, dir.path(), date())
        .expect("Excel出力失敗");
    assert!(path.to_string_lossy().contains("_盘点单_"));

    let range = read_sheet(&path);
    assert_eq!(cell(&range, 0, 0), "门店");
    assert_eq!(cell(&range, 0, 1), "OMEGA酸奶（西直门店）");
    assert_eq!(cell(&range, 1, 1), "xzm_user");
    assert_eq!(cell(&range, 2, 1), "盘点单");
    assert_eq!(cell(&range, 3, 0), "开始时间");
    assert_eq!(cell(&range, 4, 0), "");

    // 见出しは6行目
    assert_eq!(cell(&range, 5, 4), "盘点数量");
    assert_eq!(cell(&range, 6, 5), "不再使用");
    assert_eq!(cell(&range, 6, 4), "0");
    assert_eq!(cell(&range, 10, 1), "蜂蜜柠檬");
    assert_eq!(cell(&range, 10, 2), "无规格");
    assert_eq!(cell(&range, 10, 5), "新增");
    assert_eq!(range.get_size().0, 11);
}

#[test]
fn test_export_creates_output_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("exports").join("2026");
    let session = create_session(Mode::Count);

    let path = export::export_session_on(&session, ExportLayout::Flat, &nested, date())
        .expect("Excel出力失敗");

    assert!(path.starts_with(&nested));
    let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}
