use super::{required_text, Gift, GiftId, ListId};
use crate::error::{GiftError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ギフトリスト
///
/// `gifts` の並びがそのまま表示順（追加順）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub occasion: String,
    /// 作成日時
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub gifts: Vec<Gift>,
}

impl GiftList {
    /// 空のリストを生成
    pub(crate) fn create(name: &str, occasion: &str, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: ListId::generate(),
            name: required_text(name, "list name")?,
            occasion: occasion.trim().to_string(),
            date: now,
            gifts: Vec::new(),
        })
    }

    pub fn gift(&self, gift_id: &GiftId) -> Option<&Gift> {
        self.gifts.iter().find(|g| &g.id == gift_id)
    }

    /// ギフトを取得（見つからなければ GiftNotFound）
    pub(crate) fn gift_mut(&mut self, gift_id: &GiftId) -> Result<&mut Gift> {
        let list_id = self.id.clone();
        self.gifts
            .iter_mut()
            .find(|g| &g.id == gift_id)
            .ok_or_else(|| GiftError::GiftNotFound {
                list_id,
                gift_id: gift_id.clone(),
            })
    }

    /// ギフトを取り除いて返す
    pub(crate) fn remove_gift(&mut self, gift_id: &GiftId) -> Result<Gift> {
        match self.gifts.iter().position(|g| &g.id == gift_id) {
            Some(index) => Ok(self.gifts.remove(index)),
            None => Err(GiftError::GiftNotFound {
                list_id: self.id.clone(),
                gift_id: gift_id.clone(),
            }),
        }
    }

    /// 現在の価格の合計
    ///
    /// 常にその時点のギフトから計算する（キャッシュしない）。
    pub fn total_budget(&self) -> f64 {
        self.gifts.iter().map(|g| g.price).sum()
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
