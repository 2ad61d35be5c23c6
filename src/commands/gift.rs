//! gfl gift コマンド
//!
//! ギフトの追加・編集・価格更新・購入済み切替・削除・価格履歴表示。

use super::{resolve_gift_id, resolve_list_id, Store};
use clap::{Parser, Subcommand};
use giftlist::model::parse_price;
use giftlist::output::{format_price, history_table, purchase_status, StatusLine};
use giftlist::{Gift, GiftId, ListId, NewGift};

#[derive(Debug, Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a gift to a list
    Add {
        /// List id (or unique prefix)
        list: String,

        #[command(flatten)]
        fields: GiftFields,
    },

    /// Edit gift details
    Edit {
        /// List id (or unique prefix)
        list: String,

        /// Gift id (or unique prefix)
        gift: String,

        #[command(flatten)]
        fields: GiftFields,

        /// Mark as purchased (true) or pending (false)
        #[arg(long)]
        purchased: Option<bool>,

        /// Remove the target price
        #[arg(long, conflicts_with = "target_price")]
        clear_target: bool,
    },

    /// Record a new price for a gift
    Price {
        /// List id (or unique prefix)
        list: String,

        /// Gift id (or unique prefix)
        gift: String,

        /// New price
        #[arg(allow_negative_numbers = true)]
        price: String,
    },

    /// Toggle the purchased flag
    Toggle {
        /// List id (or unique prefix)
        list: String,

        /// Gift id (or unique prefix)
        gift: String,
    },

    /// Delete a gift
    Rm {
        /// List id (or unique prefix)
        list: String,

        /// Gift id (or unique prefix)
        gift: String,
    },

    /// Show the price history of a gift
    History {
        /// List id (or unique prefix)
        list: String,

        /// Gift id (or unique prefix)
        gift: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// ギフトの入力項目（add では name/recipient/price が必須）
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GiftFields {
    /// Gift name
    #[arg(long)]
    pub name: Option<String>,

    /// Who the gift is for
    #[arg(long)]
    pub recipient: Option<String>,

    /// Price
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<String>,

    /// Target price to wait for
    #[arg(long, allow_negative_numbers = true)]
    pub target_price: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Occasion label (defaults to the list's occasion)
    #[arg(long)]
    pub occasion: Option<String>,

    /// Due date (e.g. 2024-12-25)
    #[arg(long)]
    pub due: Option<String>,
}

pub async fn run(args: Args, store: &Store) -> Result<(), String> {
    match args.command {
        Command::Add { list, fields } => run_add(store, &list, fields).await,
        Command::Edit {
            list,
            gift,
            fields,
            purchased,
            clear_target,
        } => run_edit(store, &list, &gift, fields, purchased, clear_target).await,
        Command::Price { list, gift, price } => run_price(store, &list, &gift, &price).await,
        Command::Toggle { list, gift } => {
            let (list_id, gift_id) = resolve(store, &list, &gift)?;
            let gift = store
                .toggle_purchased(&list_id, &gift_id)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                StatusLine::success(format!("{} is now {}", gift.name, purchase_status(&gift)))
                    .render()
            );
            Ok(())
        }
        Command::Rm { list, gift } => {
            let (list_id, gift_id) = resolve(store, &list, &gift)?;
            let removed = store
                .delete_gift(&list_id, &gift_id)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                StatusLine::success(format!("Deleted {}", removed.name)).render()
            );
            Ok(())
        }
        Command::History { list, gift, json } => {
            let (list_id, gift_id) = resolve(store, &list, &gift)?;
            let gift = store.gift(&list_id, &gift_id).map_err(|e| e.to_string())?;
            if json {
                return serde_json::to_string_pretty(gift.price_history())
                    .map(|json| println!("{json}"))
                    .map_err(|e| format!("Failed to serialize price history: {}", e));
            }
            println!("{} for {}", gift.name, gift.recipient);
            println!("{}", history_table(&gift));
            Ok(())
        }
    }
}

async fn run_add(store: &Store, list: &str, fields: GiftFields) -> Result<(), String> {
    let list_id = resolve_list_id(&store.snapshot(), list)?;
    let input = new_gift_from(fields)?;
    let gift = store
        .add_gift(&list_id, input)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{}",
        StatusLine::success(format!(
            "Added {} for {} at {} ({})",
            gift.name,
            gift.recipient,
            format_price(gift.price),
            gift.id
        ))
        .render()
    );
    Ok(())
}

async fn run_edit(
    store: &Store,
    list: &str,
    gift: &str,
    fields: GiftFields,
    purchased: Option<bool>,
    clear_target: bool,
) -> Result<(), String> {
    let (list_id, gift_id) = resolve(store, list, gift)?;
    let current = store.gift(&list_id, &gift_id).map_err(|e| e.to_string())?;
    let edited = apply_fields(current, fields, purchased, clear_target)?;
    let gift = store
        .update_gift(&list_id, &edited)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{}",
        StatusLine::success(format!("Updated {}", gift.name)).render()
    );
    Ok(())
}

async fn run_price(store: &Store, list: &str, gift: &str, price: &str) -> Result<(), String> {
    let (list_id, gift_id) = resolve(store, list, gift)?;
    let price = parse_price(price, "price").map_err(|e| e.to_string())?;
    let gift = store
        .update_price(&list_id, &gift_id, price)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "{}",
        StatusLine::success(format!(
            "{} is now {} ({} price record(s))",
            gift.name,
            format_price(gift.price),
            gift.price_history().len()
        ))
        .render()
    );
    if gift.at_or_below_target() == Some(true) {
        println!(
            "{}",
            StatusLine::success("Price reached the target").render()
        );
    }
    Ok(())
}

fn resolve(store: &Store, list: &str, gift: &str) -> Result<(ListId, GiftId), String> {
    let snapshot = store.snapshot();
    let list_id = resolve_list_id(&snapshot, list)?;
    let list = store.list(&list_id).map_err(|e| e.to_string())?;
    let gift_id = resolve_gift_id(&list, gift)?;
    Ok((list_id, gift_id))
}

/// 入力項目から NewGift を組み立てる
fn new_gift_from(fields: GiftFields) -> Result<NewGift, String> {
    let name = fields.name.ok_or("Missing required field: --name")?;
    let recipient = fields.recipient.ok_or("Missing required field: --recipient")?;
    let price = fields.price.ok_or("Missing required field: --price")?;
    let price = parse_price(&price, "price").map_err(|e| e.to_string())?;

    let mut input = NewGift::new(name, recipient, price);
    if let Some(target) = fields.target_price {
        input = input.with_target_price(
            parse_price(&target, "target price").map_err(|e| e.to_string())?,
        );
    }
    input.notes = fields.notes;
    input.occasion = fields.occasion;
    input.due_date = fields.due;
    Ok(input)
}

/// 現在のギフトに指定された項目だけを上書きする
fn apply_fields(
    mut gift: Gift,
    fields: GiftFields,
    purchased: Option<bool>,
    clear_target: bool,
) -> Result<Gift, String> {
    if let Some(name) = fields.name {
        gift.name = name;
    }
    if let Some(recipient) = fields.recipient {
        gift.recipient = recipient;
    }
    if let Some(price) = fields.price {
        gift.price = parse_price(&price, "price").map_err(|e| e.to_string())?;
    }
    if let Some(target) = fields.target_price {
        gift.target_price =
            Some(parse_price(&target, "target price").map_err(|e| e.to_string())?);
    }
    if clear_target {
        gift.target_price = None;
    }
    if let Some(notes) = fields.notes {
        gift.notes = Some(notes);
    }
    if let Some(occasion) = fields.occasion {
        gift.occasion = occasion;
    }
    if let Some(due) = fields.due {
        gift.due_date = Some(due);
    }
    if let Some(purchased) = purchased {
        gift.purchased = purchased;
    }
    Ok(gift)
}

#[cfg(test)]
#[path = "gift_test.rs"]
mod tests;
