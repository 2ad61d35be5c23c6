//! ギフトリスト管理
//!
//! 贈り物リスト（名前・occasion・ギフト・価格履歴）をローカルのキーバリューストアに
//! 保存する。状態の正本は [`store::ListStore`] が 1 つだけ持ち、すべての変更はその操作を通す。

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod storage;
pub mod store;
pub mod summary;

pub use error::{ErrorKind, GiftError, Result};
pub use model::{Gift, GiftId, GiftList, ListId, NewGift, PriceEntry};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{ListStore, Snapshot, DEFAULT_STORAGE_KEY};
pub use summary::ListSummary;
