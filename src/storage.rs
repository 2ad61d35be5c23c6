//! 永続ストレージ抽象化
//!
//! 文字列キー → 文字列値の単純なキーバリューストア。
//! テスト時は MemoryStorage を注入してストレージをモック化できる。
//! 本番コードでは FileStorage を使用する。

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use async_trait::async_trait;

/// キーバリューストアを抽象化するトレイト
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// 値を取得
    ///
    /// - キーが存在しなければ Ok(None)
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 値を保存
    ///
    /// - 既存の値は丸ごと置き換える
    /// - 失敗時に古い値が壊れていないこと（途中まで書かれた値が読めないこと）
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 値を別のキーへそのまま複製
    ///
    /// - 文字列として読めない内容でも元のバイト列を保つ
    /// - 元のキーが存在しなければ Ok(false)
    async fn copy(&self, from: &str, to: &str) -> Result<bool>;
}

#[async_trait]
impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn copy(&self, from: &str, to: &str) -> Result<bool> {
        (**self).copy(from, to).await
    }
}
