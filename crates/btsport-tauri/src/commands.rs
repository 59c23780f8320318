//! Tauri commands for the BT Sport resolver
//!
//! This module contains all Tauri command implementations.

use btsport_core::{Category, Channel, Epg, Video, channel_by_id, channels};
use tauri::State;

use crate::ScraperState;

/// Videos per page for every listing command
const PAGE_SIZE: u32 = 10;

/// One page of a video listing plus the total page count
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPage {
    pub videos: Vec<Video>,
    pub num_pages: u64,
}

/// List the video categories, default listing first
#[tauri::command]
pub async fn list_categories(state: State<'_, ScraperState>) -> Result<Vec<Category>, String> {
    let scraper = state.scraper.lock().await;
    scraper
        .list_categories()
        .await
        .map(Iterator::collect)
        .map_err(|e| e.to_string())
}

/// One page of videos for a category
///
/// # Arguments
/// * `path` - Category path from `list_categories`
/// * `page` - 1-based page number
#[tauri::command]
pub async fn category_videos(
    state: State<'_, ScraperState>,
    path: String,
    page: u32,
) -> Result<VideoPage, String> {
    let scraper = state.scraper.lock().await;
    let query = scraper
        .query_fragment(&path)
        .await
        .map_err(|e| e.to_string())?;
    let (videos, num_pages) = scraper
        .video_results(query.as_deref(), page, PAGE_SIZE)
        .await
        .map_err(|e| e.to_string())?;
    Ok(VideoPage {
        videos: videos.collect(),
        num_pages,
    })
}

/// One page of free-text search results
#[tauri::command]
pub async fn search_videos(
    state: State<'_, ScraperState>,
    term: String,
    page: u32,
) -> Result<VideoPage, String> {
    let scraper = state.scraper.lock().await;
    let (videos, num_pages) = scraper
        .search_results(&term, page, PAGE_SIZE)
        .await
        .map_err(|e| e.to_string())?;
    Ok(VideoPage {
        videos: videos.collect(),
        num_pages,
    })
}

/// The live channels
#[tauri::command]
pub fn list_channels() -> Vec<Channel> {
    channels().to_vec()
}

/// Resolve a live channel's stream URL
///
/// # Returns
/// The HLS URL, or null if the credentials were refused
///
/// # Errors
/// Returns error message as String if any handshake step fails,
/// including the upstream reason when the stream is unavailable
#[tauri::command]
pub async fn live_stream_url(
    state: State<'_, ScraperState>,
    user: String,
    password: String,
    channel_id: u32,
) -> Result<Option<String>, String> {
    let scraper = state.scraper.lock().await;
    scraper
        .resolve_live_stream(&user, &password, channel_id)
        .await
        .map_err(|e| e.to_string())
}

/// Now/next programmes for a live channel
#[tauri::command]
pub async fn channel_epg(state: State<'_, ScraperState>, channel_id: u32) -> Result<Epg, String> {
    let channel =
        channel_by_id(channel_id).ok_or_else(|| format!("Unknown channel id: {}", channel_id))?;
    let scraper = state.scraper.lock().await;
    scraper.channel_epg(channel).await.map_err(|e| e.to_string())
}
