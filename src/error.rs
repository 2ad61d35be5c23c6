use crate::model::{GiftId, ListId};
use thiserror::Error;

/// ギフトリスト統一エラー型
#[derive(Debug, Error)]
pub enum GiftError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Gift not found: {gift_id} (list: {list_id})")]
    GiftNotFound { list_id: ListId, gift_id: GiftId },

    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GiftError>;

/// エラー分類
///
/// 呼び出し側（UI）はこの分類だけを見て表示やリトライを判断する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力不正（永続化は一切行われていない）
    Validation,
    /// 参照先のリスト/ギフトが現在のスナップショットに存在しない
    NotFound,
    /// ストレージの読み書き失敗
    Persistence,
}

impl GiftError {
    /// エラー分類を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            GiftError::Validation(_) => ErrorKind::Validation,
            GiftError::ListNotFound(_) | GiftError::GiftNotFound { .. } => ErrorKind::NotFound,
            GiftError::Persistence(_) | GiftError::Io(_) | GiftError::Json(_) => {
                ErrorKind::Persistence
            }
        }
    }

    /// 再試行で解消する可能性があるか
    ///
    /// 自動リトライはしない。UI が再試行ボタンを出すかどうかの判断材料。
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Persistence
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        GiftError::Validation(message.into())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
