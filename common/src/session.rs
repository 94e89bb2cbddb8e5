//! 盘点・订货セッション
//!
//! 货品清单・現在位置・入力中テキストを1つの値として保持し、
//! 全ての操作をこの値へのメソッド呼び出しとして受け付ける。
//! 位置を動かす操作は、移動前に必ず入力中テキストを確定する。

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::mutation::{self, CommitOutcome, Correction, NewItem};
use crate::types::{ItemStatus, Mode, Operator, ProductItem, Progress, SourceItem};
use chrono::{DateTime, Local};

/// 未処理货品へのジャンプ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Moved(usize),
    /// 全て処理済み（位置は変わらない）
    AllProcessed,
}

/// 操作員の確認が必要になりうる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MarkUnused,
    Finish,
    /// セッションを破棄してモード選択へ戻る
    Leave,
}

/// 確認が必要な理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    MarkUnused { name: String, unused_after: bool },
    FinishWithPending { pending: usize },
    Leave,
}

impl Confirmation {
    /// 確認ダイアログの文言
    pub fn message(&self) -> String {
        match self {
            Confirmation::MarkUnused { name, unused_after: true } => {
                format!("确定标记 {} 为不再使用吗？", name)
            }
            Confirmation::MarkUnused { name, unused_after: false } => {
                format!("确定取消 {} 的不再使用标记吗？", name)
            }
            Confirmation::FinishWithPending { pending } => {
                format!("还有 {} 个货品未处理，确定要结束吗？", pending)
            }
            Confirmation::Leave => "确定要退出当前系统返回主菜单吗？".to_string(),
        }
    }
}

/// 終了時の集計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishReport {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// 終了時に確定した入力
    pub commit: CommitOutcome,
}

/// 1回分の作業セッション
#[derive(Debug, Clone)]
pub struct Session {
    operator: Operator,
    mode: Mode,
    items: Vec<ProductItem>,
    start_time: DateTime<Local>,
    cursor: Cursor,
    staged: String,
    next_new_id: usize,
}

impl Session {
    /// 货品ソースからセッションを開始
    pub fn new(operator: Operator, mode: Mode, source: Vec<SourceItem>) -> Result<Self> {
        Self::with_start_time(operator, mode, source, Local::now())
    }

    pub fn with_start_time(
        operator: Operator,
        mode: Mode,
        source: Vec<SourceItem>,
        start_time: DateTime<Local>,
    ) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::EmptyItemList);
        }

        let items: Vec<ProductItem> = source
            .into_iter()
            .enumerate()
            .map(|(i, s)| ProductItem::from_source(i, s))
            .collect();

        tracing::info!(
            store = %operator.store_name,
            operator = %operator.username,
            %mode,
            items = items.len(),
            "session started"
        );

        let mut session = Self {
            operator,
            mode,
            items,
            start_time,
            cursor: Cursor::new(),
            staged: String::new(),
            next_new_id: 1,
        };
        session.reseed_staged();
        Ok(session)
    }

    pub fn operator(&self) -> &Operator { &self.operator }
    pub fn store_name(&self) -> &str { &self.operator.store_name }
    pub fn mode(&self) -> Mode { self.mode }
    pub fn start_time(&self) -> DateTime<Local> { self.start_time }
    pub fn items(&self) -> &[ProductItem] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn position(&self) -> usize { self.cursor.position() }
    pub fn staged(&self) -> &str { &self.staged }

    /// セッション中は常に1件以上ある
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.cursor.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.cursor.is_last(self.items.len())
    }

    /// 現在の货品
    pub fn current(&self) -> &ProductItem {
        &self.items[self.cursor.position()]
    }

    fn current_mut(&mut self) -> &mut ProductItem {
        let position = self.cursor.position();
        &mut self.items[position]
    }

    /// 入力中テキストを置き換え（確定はしない）
    pub fn set_staged(&mut self, text: impl Into<String>) {
        self.staged = text.into();
    }

    /// 入力中テキストを確定済み数量から作り直す
    ///
    /// 跳过済みの货品は空にする（再訪しただけで0がCOMPLETEDに化けないように）。
    fn reseed_staged(&mut self) {
        let item = self.current();
        self.staged = match item.status() {
            ItemStatus::Skipped => String::new(),
            ItemStatus::Pending | ItemStatus::Completed => item.quantity_text().unwrap_or_default(),
        };
    }

    /// 入力中テキストを現在の货品に確定
    pub fn commit(&mut self) -> CommitOutcome {
        let staged = std::mem::take(&mut self.staged);
        let outcome = mutation::commit_staged(self.current_mut(), &staged);
        self.reseed_staged();
        outcome
    }

    /// 確定して次へ。移動したら true
    pub fn next(&mut self) -> bool {
        self.commit();
        let moved = self.cursor.advance(self.items.len());
        self.reseed_staged();
        moved
    }

    /// 確定して前へ。移動したら true
    pub fn previous(&mut self) -> bool {
        self.commit();
        let moved = self.cursor.retreat();
        self.reseed_staged();
        moved
    }

    /// 確定して指定位置へ（一覧からの選択）
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange { index, len: self.items.len() });
        }

        self.commit();
        self.cursor.jump_to(index, self.items.len())?;
        self.reseed_staged();
        Ok(())
    }

    /// 確定して最初の未処理货品へ
    pub fn jump_to_first_pending(&mut self) -> JumpOutcome {
        self.commit();

        match self.items.iter().position(|i| i.status().is_pending()) {
            Some(index) => {
                // index は清单内なので失敗しない
                if self.cursor.jump_to(index, self.items.len()).is_ok() {
                    self.reseed_staged();
                }
                JumpOutcome::Moved(index)
            }
            None => JumpOutcome::AllProcessed,
        }
    }

    /// 跳过（无需订货）して次へ。ORDER以外では拒否する
    ///
    /// 入力中テキストは確定せず破棄する。
    pub fn skip(&mut self) -> Result<bool> {
        if !self.mode.allows_skip() {
            return Err(Error::InvalidModeOperation {
                operation: "skip",
                mode: self.mode,
            });
        }

        mutation::skip(self.current_mut());
        self.staged.clear();
        let moved = self.cursor.advance(self.items.len());
        self.reseed_staged();
        Ok(moved)
    }

    /// 不再使用を切り替え、新しい値を返す
    ///
    /// ON にした場合は末尾でなければ次へ進む。
    pub fn toggle_unused(&mut self) -> bool {
        let unused = mutation::toggle_unused(self.current_mut());

        // 入力中の値で数量0が上書きされないように作り直してから進む
        self.reseed_staged();
        if unused && !self.is_last() {
            self.next();
        }
        unused
    }

    /// 現在の货品の名称・规格・单位を修正
    pub fn correct_current(&mut self, correction: Correction) {
        mutation::correct(self.current_mut(), correction);
    }

    /// 新規货品を末尾に追加（位置は動かさない）
    pub fn append_item(&mut self, input: NewItem) -> Result<&ProductItem> {
        let id = format!("new-{}", self.next_new_id);
        let item = mutation::new_item(id, input)?;
        self.next_new_id += 1;

        tracing::debug!(id = %item.id(), name = %item.name(), "item appended");
        self.items.push(item);

        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// 進捗（PENDING以外を処理済みとする）
    pub fn progress(&self) -> Progress {
        Progress::of(&self.items)
    }

    /// 未処理货品の位置一覧
    pub fn pending_indices(&self) -> Vec<usize> {
        self.indices_where(|i| i.status().is_pending())
    }

    /// 処理済み货品の位置一覧
    pub fn processed_indices(&self) -> Vec<usize> {
        self.indices_where(|i| !i.status().is_pending())
    }

    fn indices_where<F>(&self, filter: F) -> Vec<usize>
    where
        F: Fn(&ProductItem) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter(item))
            .map(|(i, _)| i)
            .collect()
    }

    /// 操作前に確認が必要か（状態は変えない）
    pub fn confirmation_for(&self, action: Action) -> Option<Confirmation> {
        match action {
            Action::MarkUnused => {
                let item = self.current();
                Some(Confirmation::MarkUnused {
                    name: item.name().to_string(),
                    unused_after: !item.is_unused(),
                })
            }
            Action::Finish => {
                let pending = self.pending_after_commit();
                if pending > 0 {
                    Some(Confirmation::FinishWithPending { pending })
                } else {
                    None
                }
            }
            Action::Leave => Some(Confirmation::Leave),
        }
    }

    /// 入力中テキストを確定した後の未処理件数
    fn pending_after_commit(&self) -> usize {
        let pending = self.progress().pending();
        let resolves_current = self.current().status().is_pending()
            && mutation::plan_commit(&self.staged).is_committed();

        if resolves_current {
            pending - 1
        } else {
            pending
        }
    }

    /// 入力中テキストを確定して集計する
    ///
    /// 未処理が残っていても止めない（確認は呼び出し側の責任）。
    pub fn finish(&mut self) -> FinishReport {
        let commit = self.commit();
        let progress = self.progress();

        tracing::info!(
            store = %self.operator.store_name,
            completed = progress.completed,
            total = progress.total,
            "session finished"
        );

        FinishReport {
            total: progress.total,
            completed: progress.completed,
            pending: progress.pending(),
            commit,
        }
    }
}
