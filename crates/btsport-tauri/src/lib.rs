//! BT Sport Tauri Integration
//!
//! Provides Tauri plugin for frontend integration with the BT Sport resolver.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(btsport_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const categories = await invoke('plugin:btsport|list_categories');
//! const { videos, numPages } = await invoke('plugin:btsport|category_videos', {
//!   path: categories[1].path,
//!   page: 1
//! });
//!
//! const url = await invoke('plugin:btsport|live_stream_url', {
//!   user, password, channelId: 2020
//! });
//! ```

use std::sync::Arc;
use tokio::sync::Mutex;

use btsport_core::BtSportScraper;
use tauri::{
    Manager, Runtime,
    plugin::{Builder, TauriPlugin},
};

mod commands;

pub use commands::VideoPage;

/// Thread-safe wrapper for BtSportScraper
///
/// Uses Arc<Mutex<>> so commands share one HTTP connection pool and
/// run one at a time. The scraper keeps no credentials.
pub struct ScraperState {
    pub(crate) scraper: Arc<Mutex<BtSportScraper>>,
}

impl ScraperState {
    /// Create a new ScraperState with default configuration
    ///
    /// # Errors
    /// Returns error string if scraper initialization fails
    pub fn new() -> Result<Self, String> {
        let scraper = BtSportScraper::new().map_err(|e| e.to_string())?;
        Ok(Self {
            scraper: Arc::new(Mutex::new(scraper)),
        })
    }
}

/// Initialize the btsport plugin
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("btsport")
        .invoke_handler(tauri::generate_handler![
            commands::list_categories,
            commands::category_videos,
            commands::search_videos,
            commands::list_channels,
            commands::live_stream_url,
            commands::channel_epg
        ])
        .setup(|app, _api| {
            let state = ScraperState::new().map_err(Box::<dyn std::error::Error>::from)?;
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use btsport_core::{Category, Channel, Epg, Program, Video};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_state_creation() {
        let state = ScraperState::new();
        assert!(state.is_ok());
    }

    #[test]
    fn test_scraper_state_lock() {
        let state = ScraperState::new().unwrap();
        assert!(state.scraper.try_lock().is_ok());
    }

    #[test]
    fn test_list_channels_command() {
        let channels = commands::list_channels();
        assert_eq!(channels.len(), 5);
        assert_eq!(channels[0].name, "BT Sport 1");

        let json = serde_json::to_value(&channels).unwrap();
        assert_eq!(json[0]["thumbnail"], channels[0].thumbnail());
    }

    #[test]
    fn test_video_page_serialization() {
        let page = VideoPage {
            videos: Vec::new(),
            num_pages: 3,
        };
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"videos":[],"numPages":3}"#);
    }
}
