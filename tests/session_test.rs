//! セッション操作の統合テスト
//!
//! 公開APIだけで一連の作業を再現する

use stocktake_common::{
    Action, Confirmation, Correction, Error, ItemStatus, JumpOutcome, Mode, NewItem, Operator,
    Session, SourceItem,
};

fn operator() -> Operator {
    Operator {
        username: "wdk_user".to_string(),
        store_name: "宝珠奶酪（五道口店）".to_string(),
    }
}

fn session(mode: Mode, count: usize) -> Session {
    let source = (0..count)
        .map(|i| SourceItem::new(format!("货品{}", (b'A' + i as u8) as char), "1kg/袋", "袋"))
        .collect();
    Session::new(operator(), mode, source).expect("セッション作成失敗")
}

fn assert_cursor_in_range(s: &Session) {
    assert!(s.position() < s.len(), "位置が範囲外: {} / {}", s.position(), s.len());
}

fn assert_progress_matches(s: &Session) {
    let non_pending = s.items().iter().filter(|i| i.status() != ItemStatus::Pending).count();
    assert_eq!(s.progress().completed, non_pending);
}

/// 数量入力 → 次へ → 不再使用 → 次へ
#[test]
fn test_count_example_walkthrough() {
    let mut s = session(Mode::Count, 3);

    s.set_staged("5");
    s.next();
    s.toggle_unused();

    let items = s.items();
    assert_eq!((items[0].quantity(), items[0].status()), (Some(5.0), ItemStatus::Completed));
    assert_eq!((items[1].quantity(), items[1].status()), (Some(0.0), ItemStatus::Completed));
    assert!(items[1].is_unused());
    assert_eq!((items[2].quantity(), items[2].status()), (None, ItemStatus::Pending));
    assert_eq!(s.position(), 2);
    assert_eq!(s.progress().completed, 2);
    assert_eq!(s.progress().total, 3);
}

/// ORDERで先頭を跳过
#[test]
fn test_order_skip_example() {
    let mut s = session(Mode::Order, 2);
    s.skip().expect("跳过失敗");

    assert_eq!(s.items()[0].quantity(), Some(0.0));
    assert_eq!(s.items()[0].status(), ItemStatus::Skipped);
    assert_eq!(s.position(), 1);
}

/// 全件処理済みでのジャンプは位置を変えない
#[test]
fn test_jump_when_all_processed() {
    let mut s = session(Mode::Count, 3);
    for _ in 0..3 {
        s.set_staged("1");
        s.next();
    }
    s.jump_to(1).expect("範囲内");

    assert_eq!(s.jump_to_first_pending(), JumpOutcome::AllProcessed);
    assert_eq!(s.position(), 1);
}

/// COUNTでの跳过は拒否され状態も変わらない
#[test]
fn test_skip_rejected_in_count() {
    let mut s = session(Mode::Count, 2);
    let before = s.items().to_vec();

    let err = s.skip().expect_err("COUNTでは拒否されるべき");
    assert!(matches!(err, Error::InvalidModeOperation { operation: "skip", mode: Mode::Count }));
    assert_eq!(s.items(), &before[..]);
}

/// 数量確定は以前の状態に関わらずCOMPLETED
#[test]
fn test_numeric_commit_always_completes() {
    let mut s = session(Mode::Order, 3);
    s.skip().expect("跳过失敗");
    s.previous();
    s.set_staged("6");
    s.next();

    assert_eq!(s.items()[0].status(), ItemStatus::Completed);
    assert_eq!(s.items()[0].quantity(), Some(6.0));
}

/// 修正は初回の値だけを保存
#[test]
fn test_correction_originals_captured_once() {
    let mut s = session(Mode::Count, 1);
    s.correct_current(Correction { name: "甲".into(), spec: "乙".into(), unit: "丙".into() });
    s.correct_current(Correction { name: "丁".into(), spec: "戊".into(), unit: "己".into() });

    let item = s.current();
    assert_eq!((item.name(), item.spec(), item.unit()), ("丁", "戊", "己"));
    assert_eq!(item.original_name(), Some("货品A"));
    assert_eq!(item.original_spec(), Some("1kg/袋"));
    assert_eq!(item.original_unit(), Some("袋"));
    assert!(item.has_error());
}

/// 任意の操作列で位置と進捗の不変条件を保つ
#[test]
fn test_invariants_over_mixed_operations() {
    let mut s = session(Mode::Order, 4);

    let steps: [fn(&mut Session); 15] = [
        |s: &mut Session| s.set_staged("abc"),
        |s: &mut Session| { s.next(); },
        |s: &mut Session| { s.skip().expect("跳过失敗"); },
        |s: &mut Session| { s.previous(); },
        |s: &mut Session| { s.toggle_unused(); },
        |s: &mut Session| { s.jump_to_first_pending(); },
        |s: &mut Session| s.set_staged("3.5"),
        |s: &mut Session| { s.next(); },
        |s: &mut Session| { s.next(); },
        |s: &mut Session| { s.next(); },
        |s: &mut Session| { s.skip().expect("跳过失敗"); },
        |s: &mut Session| { s.append_item(NewItem { name: "新品".into(), ..Default::default() }).expect("追加失敗"); },
        |s: &mut Session| { s.jump_to(0).expect("範囲内"); },
        |s: &mut Session| { s.previous(); },
        |s: &mut Session| { s.finish(); },
    ];

    for step in &steps {
        step(&mut s);
        assert_cursor_in_range(&s);
        assert_progress_matches(&s);
    }
    assert_eq!(s.len(), 5);
}

/// 終了確認は未処理がある時だけ
#[test]
fn test_finish_confirmation_policy() {
    let mut s = session(Mode::Count, 2);
    assert_eq!(
        s.confirmation_for(Action::Finish),
        Some(Confirmation::FinishWithPending { pending: 2 })
    );

    s.toggle_unused();
    s.set_staged("1");
    assert_eq!(s.confirmation_for(Action::Finish), None);

    let report = s.finish();
    assert_eq!((report.completed, report.pending), (2, 0));
}
