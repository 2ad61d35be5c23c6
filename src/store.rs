//! ギフトリストストア
//!
//! 全リストの正本をメモリ上に 1 つだけ持ち、変更のたびにコレクション全体を
//! ストレージの 1 キーへ丸ごと書き込む。画面などの利用側はスナップショットを読み、
//! 変更は必ずこのストアの操作を通す。
//!
//! ## 操作の流れ
//!
//! ```text
//!   操作要求 ──▶ 書き込みロック取得（FIFO）
//!                     │
//!                     ▼
//!              最新スナップショットを複製
//!                     │
//!                     ▼
//!              検証 + 変更（失敗 → 何も書かずに終了）
//!                     │
//!                     ▼
//!              コレクション全体を保存（失敗 → 旧スナップショットのまま）
//!                     │
//!                     ▼
//!              新スナップショットを公開
//! ```
//!
//! 書き込みロックは保存の完了まで保持するため、後続の操作は必ず
//! 直前の操作が反映されたスナップショットを基に動く。
//!
//! 起動時に保存内容を読めなかった場合は `<key>.unreadable` へ複製してから
//! 空の状態で動く。複製できなかったストアは元のキーを上書きしない。

use crate::error::{GiftError, Result};
use crate::model::{Gift, GiftId, GiftList, ListId, NewGift};
use crate::storage::KeyValueStorage;
use crate::summary::ListSummary;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// 永続化キーの既定値
pub const DEFAULT_STORAGE_KEY: &str = "giftLists";

/// 読めなかった保存内容の退避先キーの接尾辞
pub const UNREADABLE_SUFFIX: &str = ".unreadable";

/// ある時点の全リスト
pub type Snapshot = Arc<Vec<GiftList>>;

/// 保存内容の読み込み結果
enum Loaded {
    Missing,
    Parsed(Vec<GiftList>),
    Unreadable(serde_json::Error),
}

pub struct ListStore<S> {
    storage: S,
    key: String,
    write_lock: Mutex<()>,
    published: watch::Sender<Snapshot>,
    /// 読めなかった保存内容を退避できなかった理由
    write_blocked: Option<String>,
}

impl<S: KeyValueStorage> ListStore<S> {
    /// ストレージから読み込んでストアを作成（読み込み失敗はエラー）
    pub async fn open(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let lists = match load(&storage, &key).await? {
            Loaded::Missing => Vec::new(),
            Loaded::Parsed(lists) => lists,
            Loaded::Unreadable(error) => {
                return Err(GiftError::Persistence(format!(
                    "Failed to parse stored lists: {error}"
                )))
            }
        };
        info!(key = %key, lists = lists.len(), "gift lists loaded");
        Ok(Self::with_lists(storage, key, lists, None))
    }

    /// ストレージから読み込んでストアを作成
    ///
    /// 読み込みに失敗しても空のコレクションで起動し、エラーは戻り値で報告する。
    /// 解析できない内容・読み込めない内容はどちらも元のバイト列のまま
    /// `<key>.unreadable` に複製する。複製にも失敗した場合、以降の変更操作は
    /// 元のキーを上書きせずに Persistence エラーを返す。
    pub async fn init(storage: S, key: impl Into<String>) -> (Self, Option<GiftError>) {
        let key = key.into();
        let (lists, error) = match load(&storage, &key).await {
            Ok(Loaded::Missing) => (Vec::new(), None),
            Ok(Loaded::Parsed(lists)) => (lists, None),
            Ok(Loaded::Unreadable(error)) => (
                Vec::new(),
                Some(GiftError::Persistence(format!(
                    "Failed to parse stored lists: {error}"
                ))),
            ),
            Err(e) => (Vec::new(), Some(e)),
        };

        let write_blocked = match &error {
            Some(e) => {
                warn!(key = %key, error = %e, "starting with empty gift lists");
                back_up_unreadable(&storage, &key)
                    .await
                    .err()
                    .map(|e| e.to_string())
            }
            None => {
                info!(key = %key, lists = lists.len(), "gift lists loaded");
                None
            }
        };
        (Self::with_lists(storage, key, lists, write_blocked), error)
    }

    fn with_lists(
        storage: S,
        key: String,
        lists: Vec<GiftList>,
        write_blocked: Option<String>,
    ) -> Self {
        let (published, _) = watch::channel(Arc::new(lists));
        Self {
            storage,
            key,
            write_lock: Mutex::new(()),
            published,
            write_blocked,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 読めなかった保存内容を退避できず、変更操作を受け付けない状態か
    pub fn is_read_only(&self) -> bool {
        self.write_blocked.is_some()
    }

    // ---- 参照系 ----

    /// 現在のスナップショット
    pub fn snapshot(&self) -> Snapshot {
        self.published.borrow().clone()
    }

    /// スナップショットの更新を購読
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.published.subscribe()
    }

    pub fn list(&self, list_id: &ListId) -> Result<GiftList> {
        find_list(&self.snapshot(), list_id).cloned()
    }

    pub fn gift(&self, list_id: &ListId, gift_id: &GiftId) -> Result<Gift> {
        let snapshot = self.snapshot();
        let list = find_list(&snapshot, list_id)?;
        list.gift(gift_id)
            .cloned()
            .ok_or_else(|| GiftError::GiftNotFound {
                list_id: list_id.clone(),
                gift_id: gift_id.clone(),
            })
    }

    /// リスト内ギフトの現在価格の合計
    pub fn total_budget(&self, list_id: &ListId) -> Result<f64> {
        Ok(find_list(&self.snapshot(), list_id)?.total_budget())
    }

    pub fn summary(&self, list_id: &ListId) -> Result<ListSummary> {
        Ok(ListSummary::of(find_list(&self.snapshot(), list_id)?))
    }

    /// 全リストの集計（コレクション順）
    pub fn summaries(&self) -> Vec<ListSummary> {
        self.snapshot().iter().map(ListSummary::of).collect()
    }

    // ---- 変更系 ----

    /// 空のリストを作成して末尾に追加
    pub async fn create_list(&self, name: &str, occasion: &str) -> Result<GiftList> {
        self.mutate("create_list", |lists| {
            let list = GiftList::create(name, occasion, Utc::now())?;
            lists.push(list.clone());
            Ok(list)
        })
        .await
    }

    /// リスト名と occasion を変更
    pub async fn rename_list(
        &self,
        list_id: &ListId,
        name: &str,
        occasion: Option<&str>,
    ) -> Result<GiftList> {
        self.mutate("rename_list", |lists| {
            let name = crate::model::required_text(name, "list name")?;
            let list = find_list_mut(lists, list_id)?;
            list.name = name;
            if let Some(occasion) = occasion {
                list.occasion = occasion.trim().to_string();
            }
            Ok(list.clone())
        })
        .await
    }

    /// リストを所属ギフトごと削除
    pub async fn delete_list(&self, list_id: &ListId) -> Result<GiftList> {
        self.mutate("delete_list", |lists| {
            let index = lists
                .iter()
                .position(|l| &l.id == list_id)
                .ok_or_else(|| GiftError::ListNotFound(list_id.clone()))?;
            Ok(lists.remove(index))
        })
        .await
    }

    /// ギフトをリスト末尾に追加
    pub async fn add_gift(&self, list_id: &ListId, input: NewGift) -> Result<Gift> {
        self.mutate("add_gift", |lists| {
            let list = find_list_mut(lists, list_id)?;
            let gift = Gift::create(input, &list.occasion, Utc::now())?;
            list.gifts.push(gift.clone());
            Ok(gift)
        })
        .await
    }

    /// ギフトの内容を置き換える（id 一致で特定）
    ///
    /// 価格履歴は呼び出し側の値を使わない。価格が変わっていれば 1 件追記する。
    pub async fn update_gift(&self, list_id: &ListId, edited: &Gift) -> Result<Gift> {
        self.mutate("update_gift", |lists| {
            let gift = find_list_mut(lists, list_id)?.gift_mut(&edited.id)?;
            gift.apply_edit(edited, Utc::now())?;
            Ok(gift.clone())
        })
        .await
    }

    /// ギフトを削除
    pub async fn delete_gift(&self, list_id: &ListId, gift_id: &GiftId) -> Result<Gift> {
        self.mutate("delete_gift", |lists| {
            find_list_mut(lists, list_id)?.remove_gift(gift_id)
        })
        .await
    }

    /// 価格を変更して履歴に追記
    pub async fn update_price(
        &self,
        list_id: &ListId,
        gift_id: &GiftId,
        new_price: f64,
    ) -> Result<Gift> {
        self.mutate("update_price", |lists| {
            let gift = find_list_mut(lists, list_id)?.gift_mut(gift_id)?;
            gift.reprice(new_price, Utc::now())?;
            Ok(gift.clone())
        })
        .await
    }

    /// 購入済みフラグを反転
    pub async fn toggle_purchased(&self, list_id: &ListId, gift_id: &GiftId) -> Result<Gift> {
        self.mutate("toggle_purchased", |lists| {
            let gift = find_list_mut(lists, list_id)?.gift_mut(gift_id)?;
            gift.purchased = !gift.purchased;
            Ok(gift.clone())
        })
        .await
    }

    /// 最新スナップショットに変更を適用し、保存できた場合のみ公開する
    async fn mutate<T, F>(&self, operation: &'static str, apply: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut Vec<GiftList>) -> Result<T> + Send,
    {
        let _guard = self.write_lock.lock().await;

        if let Some(reason) = &self.write_blocked {
            warn!(operation, key = %self.key, "refusing to overwrite unreadable gift lists");
            return Err(GiftError::Persistence(format!(
                "Stored lists under {:?} could not be read or backed up ({reason}); refusing to overwrite them",
                self.key
            )));
        }

        let mut next: Vec<GiftList> = (**self.published.borrow()).clone();
        let output = apply(&mut next).inspect_err(|e| {
            debug!(operation, error = %e, "operation rejected");
        })?;

        self.persist(&next).await.inspect_err(|e| {
            warn!(operation, error = %e, "failed to persist gift lists");
        })?;

        self.published.send_replace(Arc::new(next));
        debug!(operation, "gift lists persisted");
        Ok(output)
    }

    async fn persist(&self, lists: &[GiftList]) -> Result<()> {
        let content = serde_json::to_string(lists)?;
        self.storage.set(&self.key, &content).await
    }
}

async fn load<S: KeyValueStorage>(storage: &S, key: &str) -> Result<Loaded> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(Loaded::Missing);
    };
    match serde_json::from_str::<Vec<GiftList>>(&raw) {
        Ok(lists) => Ok(Loaded::Parsed(lists)),
        Err(error) => Ok(Loaded::Unreadable(error)),
    }
}

/// 読めなかった保存内容を `<key>.unreadable` へ複製
async fn back_up_unreadable<S: KeyValueStorage>(storage: &S, key: &str) -> Result<()> {
    let backup_key = format!("{key}{UNREADABLE_SUFFIX}");
    match storage.copy(key, &backup_key).await {
        Ok(copied) => {
            if copied {
                info!(key = %backup_key, "unreadable gift lists backed up");
            }
            Ok(())
        }
        Err(e) => {
            warn!(key = %backup_key, error = %e, "failed to back up unreadable gift lists");
            Err(e)
        }
    }
}

fn find_list<'a>(lists: &'a [GiftList], list_id: &ListId) -> Result<&'a GiftList> {
    lists
        .iter()
        .find(|l| &l.id == list_id)
        .ok_or_else(|| GiftError::ListNotFound(list_id.clone()))
}

fn find_list_mut<'a>(lists: &'a mut [GiftList], list_id: &ListId) -> Result<&'a mut GiftList> {
    lists
        .iter_mut()
        .find(|l| &l.id == list_id)
        .ok_or_else(|| GiftError::ListNotFound(list_id.clone()))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

#[cfg(test)]
#[path = "store_proptests.rs"]
mod proptests;
