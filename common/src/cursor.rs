//! 货品清单上の現在位置
//!
//! 清单の長さだけを知り、货品の中身には触れない。

use crate::error::{Error, Result};

/// 現在位置（常に `0 <= position < len`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self, len: usize) -> bool {
        self.position + 1 >= len
    }

    /// 次へ（末尾では動かない）。移動したら true
    pub fn advance(&mut self, len: usize) -> bool {
        if self.position + 1 < len {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// 前へ（先頭では動かない）。移動したら true
    pub fn retreat(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// 指定位置へ移動
    pub fn jump_to(&mut self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.position = index;
        Ok(())
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_stops_at_last() {
        let mut cursor = Cursor::new();
        assert!(cursor.advance(2));
        assert_eq!(cursor.position(), 1);
        assert!(cursor.is_last(2));
        assert!(!cursor.advance(2));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_retreat_stops_at_first() {
        let mut cursor = Cursor::new();
        assert!(!cursor.retreat());
        assert!(cursor.is_first());
        cursor.advance(3);
        assert!(cursor.retreat());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_single_item_list() {
        let mut cursor = Cursor::new();
        assert!(cursor.is_first());
        assert!(cursor.is_last(1));
        assert!(!cursor.advance(1));
    }

    #[test]
    fn test_jump_to_bounds() {
        let mut cursor = Cursor::new();
        cursor.jump_to(2, 3).expect("範囲内");
        assert_eq!(cursor.position(), 2);

        let err = cursor.jump_to(3, 3).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(cursor.position(), 2);
    }
}
