//! BT Sport Resolver Core Library
//!
//! Provides async API for listing and searching BT Sport videos, resolving
//! live channel stream URLs and reading the programme guide.
//!
//! # Overview
//!
//! This crate provides the content resolution pipeline behind a media
//! client:
//! - Category discovery from data embedded in the video hub pages
//! - Paginated video search with normalized [`Video`] records
//! - The three-step login handshake that yields a live channel's HLS URL
//! - Now/next programme guide lookup with localized start times
//! - The fixed registry of live [`Channel`]s
//!
//! # Example
//!
//! ```no_run
//! use btsport_core::{BtSportScraper, Result, channels};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = BtSportScraper::new()?;
//!
//!     // Browse a category
//!     for category in scraper.list_categories().await?.take(3) {
//!         let query = scraper.query_fragment(&category.path).await?;
//!         let (videos, pages) = scraper.video_results(query.as_deref(), 1, 10).await?;
//!         println!("{:?}: {} pages", category.title, pages);
//!         for video in videos {
//!             println!("  {} {:?}", video.title, video.url);
//!         }
//!     }
//!
//!     // Resolve a live channel
//!     if let Some(session) = scraper.login("user@example.com", "secret").await? {
//!         let avs_cookie = scraper.sport_login(&session).await?;
//!         let channel = &channels()[0];
//!         let url = scraper.hls_url(Some(&avs_cookie), channel.id).await?;
//!         println!("{}: {:?}", channel.name, url);
//!
//!         let epg = scraper.channel_epg(channel).await?;
//!         println!("now: {} ({})", epg.now.title, epg.now.start);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Credentials
//!
//! The `SMSESSION` session token and the AVS cookie are returned to the
//! caller and never stored. [`AuthState`] can carry them between calls.
//! Stream URLs are tokenized and expire; do not cache them long-term.

pub mod channels;
mod client;
mod error;
pub mod live;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{BtSportClient, ClientConfig, Endpoints, Exchange};

// Re-export error types
pub use error::{BtSportError, Result};

// Re-export channel registry
pub use channels::{Channel, channel_by_id, channels, channels_by_id};

// Re-export handshake state
pub use live::{AuthState, AuthStep};

// Re-export parser outputs
pub use parser::{Categories, VideoResults};

// Re-export main scraper API
pub use crate::scraper::BtSportScraper;

// Re-export data types
pub use types::{Category, Epg, Program, Video};
