//! Stocktake Common Library
//!
//! 盘点・订货セッションのエンジンとエクスポート用レコード。
//! ファイルや端末のI/Oは持たない。

pub mod types;
pub mod error;
pub mod cursor;
pub mod mutation;
pub mod session;
pub mod export;

pub use types::{format_quantity, ItemStatus, Mode, Operator, ProductItem, Progress, SourceItem};
pub use error::{Error, Result};
pub use cursor::Cursor;
pub use mutation::{parse_quantity, CommitOutcome, Correction, NewItem};
pub use session::{Action, Confirmation, FinishReport, JumpOutcome, Session};
pub use export::{build_record, ExportLayout, ExportRecord, ExportRow};
