//! CLI 表示用の整形
use crate::model::{Gift, GiftList};
use crate::summary::ListSummary;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;

/// 金額表示（小数 2 桁）
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// ID の短縮表示（先頭 8 文字）
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}

pub struct StatusLine {
    pub prefix: String,
    pub message: String,
}

impl StatusLine {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            prefix: "✓".green().to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            prefix: "!".yellow().to_string(),
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.prefix, self.message)
    }
}

/// リスト一覧テーブル
pub fn lists_table(summaries: &[ListSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "ID", "Name", "Occasion", "Created", "Gifts", "Budget", "Status",
    ]);

    for summary in summaries {
        table.add_row(vec![
            short_id(summary.id.as_str()).to_string(),
            summary.name.clone(),
            dash_if_empty(&summary.occasion),
            summary.date.format("%Y-%m-%d").to_string(),
            format!("{}/{}", summary.purchased_count, summary.gift_count),
            format_price(summary.total_budget),
            list_status(summary).to_string(),
        ]);
    }
    table
}

/// リスト内ギフトのテーブル
pub fn gifts_table(list: &GiftList) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Gift", "For", "Price", "Target", "Due", "Status"]);

    for gift in &list.gifts {
        table.add_row(vec![
            short_id(gift.id.as_str()).to_string(),
            gift.name.clone(),
            gift.recipient.clone(),
            format_price(gift.price),
            gift.target_price
                .map(format_price)
                .unwrap_or_else(|| "-".to_string()),
            gift.due_date.clone().unwrap_or_else(|| "-".to_string()),
            purchase_status(gift).to_string(),
        ]);
    }
    table
}

/// 価格履歴のテーブル（古い順）
pub fn history_table(gift: &Gift) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Price", "Date"]);

    for (i, entry) in gift.price_history().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format_price(entry.price),
            entry.date.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table
}

/// 全ギフト購入済みなら "complete"
pub fn list_status(summary: &ListSummary) -> &'static str {
    if summary.is_complete() {
        "complete"
    } else {
        "open"
    }
}

pub fn purchase_status(gift: &Gift) -> &'static str {
    if gift.purchased {
        "purchased"
    } else {
        "pending"
    }
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
