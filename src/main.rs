use std::sync::Arc;

use anyhow::Result;
use campusfind::api::HttpReportsApi;
use campusfind::config::FeedConfig;
use campusfind::domain::filter::Filter;
use campusfind::services::{Feed, NoticeLog};

/// Walks the first pages of the lost-reports feed and prints them.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = FeedConfig::from_env();
    let api = Arc::new(HttpReportsApi::from_config(&config)?);
    let notices = NoticeLog::new();
    let feed = Feed::with_filter(api, notices.clone(), Filter::lost());

    feed.request_page(true).await?;
    while feed.has_more().await {
        feed.request_page(false).await?;
        if feed.snapshot().await.items.len() >= 50 {
            break;
        }
    }

    let snapshot = feed.snapshot().await;
    println!("Fetched {} reports", snapshot.items.len());
    for report in &snapshot.items {
        println!(
            "#{:<5} {:<6} {:<10} {}",
            report.id,
            report.report_type.as_str(),
            format!("{:?}", report.status).to_lowercase(),
            report.item_name().unwrap_or("(missing item payload)")
        );
    }

    for notice in notices.drain() {
        eprintln!("notice: {}", notice.message);
    }

    Ok(())
}
