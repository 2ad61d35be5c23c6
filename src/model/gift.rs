use super::{optional_text, required_text, validate_price, GiftId};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 価格履歴エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub price: f64,
    pub date: DateTime<Utc>,
}

/// ギフト
///
/// `price_history` は追記のみ。書き換え・並べ替え・削除は行わない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: GiftId,
    pub name: String,
    pub recipient: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default)]
    pub occasion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    price_history: Vec<PriceEntry>,
}

/// ギフト追加時の入力
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGift {
    pub name: String,
    pub recipient: String,
    pub price: f64,
    pub target_price: Option<f64>,
    pub notes: Option<String>,
    /// 未指定なら所属リストの occasion を引き継ぐ
    pub occasion: Option<String>,
    pub due_date: Option<String>,
}

impl NewGift {
    pub fn new(name: impl Into<String>, recipient: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            recipient: recipient.into(),
            price,
            ..Default::default()
        }
    }

    pub fn with_target_price(mut self, target_price: f64) -> Self {
        self.target_price = Some(target_price);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

impl Gift {
    /// 入力を検証してギフトを生成
    ///
    /// 価格履歴は初期価格の 1 件で始まる。
    pub(crate) fn create(input: NewGift, list_occasion: &str, now: DateTime<Utc>) -> Result<Self> {
        let name = required_text(&input.name, "gift name")?;
        let recipient = required_text(&input.recipient, "recipient")?;
        let price = validate_price(input.price, "price")?;
        let target_price = input
            .target_price
            .map(|p| validate_price(p, "target price"))
            .transpose()?;
        let occasion = optional_text(input.occasion).unwrap_or_else(|| list_occasion.to_string());

        Ok(Self {
            id: GiftId::generate(),
            name,
            recipient,
            price,
            target_price,
            notes: optional_text(input.notes),
            purchased: false,
            occasion,
            due_date: optional_text(input.due_date),
            price_history: vec![PriceEntry { price, date: now }],
        })
    }

    /// 価格履歴（古い順）
    pub fn price_history(&self) -> &[PriceEntry] {
        &self.price_history
    }

    /// 価格を変更し、履歴に追記
    pub(crate) fn reprice(&mut self, price: f64, now: DateTime<Utc>) -> Result<()> {
        let price = validate_price(price, "price")?;
        self.price = price;
        self.price_history.push(PriceEntry { price, date: now });
        Ok(())
    }

    /// 履歴以外のフィールドを `edited` の内容で置き換える
    ///
    /// id と履歴は保持する。価格が変わった場合のみ履歴に 1 件追記する。
    pub(crate) fn apply_edit(&mut self, edited: &Gift, now: DateTime<Utc>) -> Result<()> {
        let name = required_text(&edited.name, "gift name")?;
        let recipient = required_text(&edited.recipient, "recipient")?;
        let price = validate_price(edited.price, "price")?;
        let target_price = edited
            .target_price
            .map(|p| validate_price(p, "target price"))
            .transpose()?;

        let price_changed = price != self.price;

        self.name = name;
        self.recipient = recipient;
        self.target_price = target_price;
        self.notes = optional_text(edited.notes.clone());
        self.purchased = edited.purchased;
        self.occasion = edited.occasion.trim().to_string();
        self.due_date = optional_text(edited.due_date.clone());

        if price_changed {
            self.reprice(price, now)?;
        }
        Ok(())
    }

    /// 目標価格以下になっているか
    pub fn at_or_below_target(&self) -> Option<bool> {
        self.target_price.map(|target| self.price <= target)
    }
}

#[cfg(test)]
#[path = "gift_test.rs"]
mod tests;
