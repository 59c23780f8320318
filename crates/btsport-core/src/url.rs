//! URL and query helpers for the BT Sport endpoints
//!
//! Provides functions for resolving category pages and building the
//! search, AVS and thumbnail request parameters.

use url::Url;

use crate::error::{BtSportError, Result};

/// Base of the site that serves the category pages
pub const SITE_BASE_URL: &str = "http://sport.bt.com/";

/// CDN directory holding the channel logos
pub const CHANNEL_LOGO_BASE_URL: &str =
    "http://images.atlas.metabroadcast.com/shaman.metabroadcast.com/bt/channels/";

/// Resolves a category page path against the site base
///
/// Uses RFC 3986 reference resolution, so absolute paths replace the
/// base path and absolute URLs are returned as-is.
///
/// # Example
/// ```
/// use btsport_core::url::resolve_page_url;
/// let url = resolve_page_url("http://sport.bt.com/", "/football/videos-01364228997417").unwrap();
/// assert_eq!(url, "http://sport.bt.com/football/videos-01364228997417");
/// ```
pub fn resolve_page_url(base: &str, path: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| BtSportError::InvalidUrl(format!("{}: {}", base, e)))?;
    base.join(path)
        .map(String::from)
        .map_err(|e| BtSportError::InvalidUrl(format!("{}: {}", path, e)))
}

/// Builds the free-text search filter for a term
///
/// The term is quoted literally; it is not escaped.
///
/// # Example
/// ```
/// use btsport_core::url::build_text_query;
/// assert_eq!(build_text_query("champions league"), r#"text:("champions league")"#);
/// ```
pub fn build_text_query(term: &str) -> String {
    format!("text:(\"{}\")", term)
}

/// Builds the search API query parameters for one page of results
///
/// `page` is 1-based. A `None` query lists every published video.
pub fn build_search_params(
    query: Option<&str>,
    page: u32,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let start = u64::from(page.saturating_sub(1)) * u64::from(page_size);

    let mut params = vec![
        ("q", "AssetType:(BTVideo)".to_string()),
        ("fq", "Publist:btsport".to_string()),
    ];
    if let Some(query) = query {
        params.push(("fq", query.to_string()));
    }
    params.extend([
        ("sort", "publicationdate desc".to_string()),
        ("wt", "json".to_string()),
        ("start", start.to_string()),
        ("rows", page_size.to_string()),
    ]);
    params
}

/// Query parameters for the AVS federated login
pub fn build_avs_login_params() -> [(&'static str, String); 2] {
    [
        ("action", "LoginBT".to_string()),
        ("channel", "WEBHLS".to_string()),
    ]
}

/// Query parameters asking the AVS backend to resolve a live channel's CDN URL
pub fn build_cdn_params(channel_id: u32) -> [(&'static str, String); 5] {
    [
        ("action", "GetCDN".to_string()),
        ("type", "LIVE".to_string()),
        ("id", channel_id.to_string()),
        ("channel", "WEBHLS".to_string()),
        ("asJson", "Y".to_string()),
    ]
}

/// Builds a channel logo URL from its filename
///
/// # Example
/// ```
/// use btsport_core::url::build_thumbnail_url;
/// assert_eq!(
///     build_thumbnail_url("BoxNation_Lozenge_201804201100.jpg"),
///     "http://images.atlas.metabroadcast.com/shaman.metabroadcast.com/bt/channels/BoxNation_Lozenge_201804201100.jpg"
/// );
/// ```
pub fn build_thumbnail_url(logo: &str) -> String {
    format!("{}{}", CHANNEL_LOGO_BASE_URL, logo)
}
