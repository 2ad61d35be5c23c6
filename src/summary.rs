//! リスト集計
//!
//! 一覧画面向けの読み取り専用の射影。毎回スナップショットから計算する。

use crate::model::{GiftList, ListId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    pub occasion: String,
    pub date: DateTime<Utc>,
    pub gift_count: usize,
    pub purchased_count: usize,
    /// 全ギフトの現在価格の合計
    pub total_budget: f64,
    /// 購入済みギフトの合計
    pub purchased_total: f64,
    /// 未購入ギフトの合計
    pub remaining_total: f64,
}

impl ListSummary {
    pub fn of(list: &GiftList) -> Self {
        let (purchased, remaining): (Vec<_>, Vec<_>) =
            list.gifts.iter().partition(|g| g.purchased);

        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            occasion: list.occasion.clone(),
            date: list.date,
            gift_count: list.gifts.len(),
            purchased_count: purchased.len(),
            total_budget: list.total_budget(),
            purchased_total: purchased.iter().map(|g| g.price).sum(),
            remaining_total: remaining.iter().map(|g| g.price).sum(),
        }
    }

    /// 全ギフト購入済みか（空リストは false）
    pub fn is_complete(&self) -> bool {
        self.gift_count > 0 && self.purchased_count == self.gift_count
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
