//! エラー型定義

use crate::types::Mode;
use thiserror::Error;

/// 共通エラー型
///
/// いずれも呼び出し側の契約違反で、黙って無視してはならない。
#[derive(Error, Debug)]
pub enum Error {
    #[error("{operation} is not available in {mode} mode")]
    InvalidModeOperation { operation: &'static str, mode: Mode },

    #[error("index {index} out of range (items: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a session needs at least one item")]
    EmptyItemList,

    #[error("new item needs a name")]
    MissingName,

    #[error("Excel error: {0}")]
    ExcelGeneration(String),
}

#[cfg(feature = "excel")]
impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Error::ExcelGeneration(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
