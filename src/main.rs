use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use resale::app::{AppContext, ResaleError};
use resale::cli::{commands, Cli, Commands};
use resale::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| ResaleError::Config(e.to_string()))?;

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List {
            search,
            max_price,
            seller,
            sort,
            descending,
        } => {
            commands::list_items(
                &ctx,
                commands::ListOptions {
                    search,
                    max_price,
                    seller,
                    sort,
                    descending,
                },
            )
            .await?;
        }
        Commands::Add {
            description,
            price,
            email,
            phone,
            picture_url,
        } => {
            commands::add_item(&ctx, description, price, email, phone, picture_url).await?;
        }
        Commands::Remove { id } => {
            commands::remove_item(&ctx, id).await?;
        }
        Commands::Tui => {
            resale::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
