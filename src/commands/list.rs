//! gfl list コマンド
//!
//! リストの作成・一覧・名前変更・削除。

use super::{resolve_list_id, Store};
use clap::{Parser, Subcommand};
use giftlist::output::{gifts_table, lists_table, short_id, StatusLine};

#[derive(Debug, Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty gift list
    New {
        /// List name
        name: String,

        /// Occasion label (e.g. Birthday, Christmas)
        #[arg(long, default_value = "")]
        occasion: String,
    },

    /// Show all lists, or the gifts of one list
    Show {
        /// List id (or unique prefix); shows all lists if omitted
        list: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Rename a list
    Rename {
        /// List id (or unique prefix)
        list: String,

        /// New name
        name: String,

        /// New occasion label
        #[arg(long)]
        occasion: Option<String>,
    },

    /// Delete a list and all of its gifts
    Rm {
        /// List id (or unique prefix)
        list: String,
    },
}

pub async fn run(args: Args, store: &Store) -> Result<(), String> {
    match args.command {
        Command::New { name, occasion } => {
            let list = store
                .create_list(&name, &occasion)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                StatusLine::success(format!("Created list {} ({})", list.name, list.id)).render()
            );
            Ok(())
        }
        Command::Show { list: None, json } => show_all(store, json),
        Command::Show {
            list: Some(list),
            json,
        } => show_one(store, &list, json),
        Command::Rename {
            list,
            name,
            occasion,
        } => {
            let list_id = resolve_list_id(&store.snapshot(), &list)?;
            let list = store
                .rename_list(&list_id, &name, occasion.as_deref())
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                StatusLine::success(format!("Renamed list to {}", list.name)).render()
            );
            Ok(())
        }
        Command::Rm { list } => {
            let list_id = resolve_list_id(&store.snapshot(), &list)?;
            let removed = store
                .delete_list(&list_id)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                StatusLine::success(format!(
                    "Deleted list {} ({} gift(s))",
                    removed.name,
                    removed.gifts.len()
                ))
                .render()
            );
            Ok(())
        }
    }
}

fn show_all(store: &Store, json: bool) -> Result<(), String> {
    let snapshot = store.snapshot();
    if json {
        // 空の場合も [] を出力
        return serde_json::to_string_pretty(&*snapshot)
            .map(|json| println!("{json}"))
            .map_err(|e| format!("Failed to serialize lists: {}", e));
    }

    if snapshot.is_empty() {
        println!("No gift lists yet");
        return Ok(());
    }
    println!("{}", lists_table(&store.summaries()));
    Ok(())
}

fn show_one(store: &Store, input: &str, json: bool) -> Result<(), String> {
    let list_id = resolve_list_id(&store.snapshot(), input)?;
    let list = store.list(&list_id).map_err(|e| e.to_string())?;

    if json {
        return serde_json::to_string_pretty(&list)
            .map(|json| println!("{json}"))
            .map_err(|e| format!("Failed to serialize list: {}", e));
    }

    println!("{} [{}] ({})", list.name, list.occasion, short_id(list.id.as_str()));
    if list.gifts.is_empty() {
        println!("No gifts yet");
    } else {
        println!("{}", gifts_table(&list));
    }
    Ok(())
}
