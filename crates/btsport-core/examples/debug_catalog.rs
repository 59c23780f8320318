//! Debug script to walk the category catalog and first page of each category
//!
//! Run with: RUST_LOG=btsport_core=debug cargo run --example debug_catalog -p btsport-core

use btsport_core::BtSportScraper;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scraper = BtSportScraper::new()?;

    println!("Fetching categories...\n");

    for category in scraper.list_categories().await? {
        let title = category.title.as_deref().unwrap_or("(all videos)");
        let query = scraper.query_fragment(&category.path).await?;
        println!("{}", title);
        println!("   Path: {}", category.path);
        println!("   Query: {}", query.as_deref().unwrap_or("-"));

        let (videos, pages) = scraper.video_results(query.as_deref(), 1, 3).await?;
        println!("   Pages: {}", pages);
        for video in videos {
            println!("   - {} [{:?}] {:?}", video.title, video.date, video.url);
        }
        println!();
    }

    Ok(())
}
