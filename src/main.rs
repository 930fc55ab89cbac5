mod explorer;
mod models;
mod scrapers;
mod store;

use anyhow::Result;
use scrapers::{BrowserCollector, Collector, PageMarkers};
use store::Store;
use tracing::{info, Level};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Bus Scout - redBus listing scraper");

    let store = Store::new(store::DB_FILE);

    // The pipeline is async (sqlx, collector seam); the explorer window
    // wants the main thread to itself, so the runtime is scoped to the
    // pipeline instead of wrapping main.
    let runtime = tokio::runtime::Runtime::new()?;
    let rows = runtime.block_on(async {
        store.ensure_schema().await?;

        let collector = BrowserCollector::new(PageMarkers::default());
        let listings = collector.collect().await?;

        if listings.is_empty() {
            info!("No listings collected, skipping insert");
        } else {
            store.append(&listings).await?;
            info!("Stored {} new listings", listings.len());
        }

        store.load_all().await
    })?;

    info!("Loaded {} stored rows, opening explorer", rows.len());

    explorer::run(rows).map_err(|e| anyhow::anyhow!("Explorer failed: {e}"))?;
    Ok(())
}
