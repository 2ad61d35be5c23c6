//! ギフトリストのデータモデル
//!
//! 永続化される JSON の形（フィールド名・省略可否）はこのモジュールの serde 定義が正。

mod gift;
mod id;
mod list;
mod price;

pub use gift::{Gift, NewGift, PriceEntry};
pub use id::{GiftId, ListId};
pub use list::GiftList;
pub use price::{parse_price, validate_price};

use crate::error::{GiftError, Result};

/// 表示用文字列を正規化（前後の空白を除去、空なら Validation）
pub(crate) fn required_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GiftError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// 任意項目の正規化（空白のみ → None）
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
