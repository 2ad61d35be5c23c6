//! gfl budget コマンド

use super::{resolve_list_id, Store};
use clap::Parser;
use giftlist::output::format_price;

#[derive(Debug, Parser)]
pub struct Args {
    /// List id (or unique prefix)
    pub list: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: Args, store: &Store) -> Result<(), String> {
    let list_id = resolve_list_id(&store.snapshot(), &args.list)?;
    let summary = store.summary(&list_id).map_err(|e| e.to_string())?;

    if args.json {
        return serde_json::to_string_pretty(&summary)
            .map(|json| println!("{json}"))
            .map_err(|e| format!("Failed to serialize budget: {}", e));
    }

    println!("Total Budget: {}", format_price(summary.total_budget));
    println!(
        "Purchased:    {} ({}/{})",
        format_price(summary.purchased_total),
        summary.purchased_count,
        summary.gift_count
    );
    println!("Remaining:    {}", format_price(summary.remaining_total));
    Ok(())
}
