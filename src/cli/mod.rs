pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "resale")]
#[command(about = "A terminal client for the SalesItems marketplace", long_about = None)]
pub struct Cli {
    /// Path to an alternative config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items for sale
    List {
        /// Only show items whose description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show items priced at most this (whole kroner)
        #[arg(short, long)]
        max_price: Option<u32>,

        /// Only show items from this seller email
        #[arg(long)]
        seller: Option<String>,

        /// Sort the listing
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort in descending order
        #[arg(short, long)]
        descending: bool,
    },
    /// Put a new item up for sale
    Add {
        /// What is being sold
        description: String,

        /// Asking price in whole kroner
        #[arg(short, long)]
        price: u32,

        /// Contact email of the seller
        #[arg(long)]
        email: String,

        /// Contact phone of the seller
        #[arg(long)]
        phone: String,

        /// Optional picture URL
        #[arg(long)]
        picture_url: Option<String>,
    },
    /// Remove an item by id
    Remove {
        /// Id of the item to remove
        id: i64,
    },
    /// Launch the TUI
    Tui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Price,
    Date,
}
