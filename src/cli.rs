use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{budget, gift, list};

#[derive(Debug, Parser)]
#[command(name = "gfl")]
#[command(about = "Gift list tracker", long_about = None)]
pub struct Cli {
    /// Data directory (overrides GIFTLIST_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key (overrides GIFTLIST_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage gift lists
    List(list::Args),

    /// Manage gifts in a list
    Gift(gift::Args),

    /// Show the budget of a list
    Budget(budget::Args),
}
