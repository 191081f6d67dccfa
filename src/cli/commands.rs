use chrono::Utc;

use crate::app::{AppContext, ResaleError, Result};
use crate::cli::SortKey;
use crate::domain::SalesItem;

pub struct ListOptions {
    pub search: Option<String>,
    pub max_price: Option<u32>,
    pub seller: Option<String>,
    pub sort: Option<SortKey>,
    pub descending: bool,
}

/// Wait for the constructor-triggered fetch to settle. Issuing a second
/// fetch here would race the first one, so the commands observe the
/// store instead.
async fn wait_for_initial_load(ctx: &AppContext) -> Result<()> {
    let mut rx = ctx.store.subscribe();
    rx.wait_for(|s| !s.is_loading)
        .await
        .map_err(|e| ResaleError::Other(e.to_string()))?;
    Ok(())
}

pub async fn list_items(ctx: &AppContext, options: ListOptions) -> Result<()> {
    wait_for_initial_load(ctx).await?;

    let error = ctx.store.error_message();
    if !error.is_empty() {
        eprintln!("Error: {}", error);
        return Ok(());
    }

    if let Some(search) = &options.search {
        ctx.store.filter_by_description(search);
    }
    ctx.store.filter_by_max_price(options.max_price);
    match options.sort {
        Some(SortKey::Price) => ctx.store.sort_by_price(!options.descending),
        Some(SortKey::Date) => ctx.store.sort_by_time(!options.descending),
        None => {}
    }

    // Ownership filtering is a presentation concern, so it happens here
    // rather than in the store.
    let items: Vec<SalesItem> = ctx
        .store
        .items()
        .into_iter()
        .filter(|item| {
            options
                .seller
                .as_deref()
                .is_none_or(|seller| item.is_seller(seller))
        })
        .collect();

    if items.is_empty() {
        println!("No items");
        return Ok(());
    }

    for item in &items {
        let date = item
            .posted_at()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());
        println!("{} {}", date, item);
    }
    println!("{} items", items.len());

    Ok(())
}

pub async fn add_item(
    ctx: &AppContext,
    description: String,
    price: u32,
    email: String,
    phone: String,
    picture_url: Option<String>,
) -> Result<()> {
    wait_for_initial_load(ctx).await?;

    let item = SalesItem::unpersisted(
        description.clone(),
        price,
        email,
        phone,
        Utc::now().timestamp(),
        picture_url,
    );

    ctx.store.create(item).await?;

    let error = ctx.store.error_message();
    if error.is_empty() {
        println!("Added: {}, {}kr", description, price);
    } else {
        eprintln!("Not added: {}", error);
    }

    Ok(())
}

pub async fn remove_item(ctx: &AppContext, id: i64) -> Result<()> {
    wait_for_initial_load(ctx).await?;

    ctx.store.delete_by_id(id).await?;

    let error = ctx.store.error_message();
    if error.is_empty() {
        println!("Removed item {}", id);
    } else {
        eprintln!("Not removed: {}", error);
    }

    Ok(())
}
