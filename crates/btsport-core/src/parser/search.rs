//! Search API response parser
//!
//! Decodes the search API's JSON envelope and normalizes each raw
//! document into a [`Video`].

use std::vec;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::types::Video;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    num_found: u64,
    #[serde(default)]
    docs: Vec<RawVideo>,
}

/// A search result document as the API returns it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    #[serde(default)]
    pub h1title: Option<String>,
    #[serde(default)]
    pub teaser: Option<String>,
    #[serde(default)]
    pub hlsurl: Option<String>,
    #[serde(default)]
    pub streamingurl: Option<String>,
    #[serde(default)]
    pub imageurl: Option<String>,
    #[serde(default, rename = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub publicationdate: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
}

/// One page of search results, normalized on demand
///
/// Single pass: once drained it yields nothing more.
#[derive(Debug)]
pub struct VideoResults {
    docs: vec::IntoIter<RawVideo>,
}

impl Iterator for VideoResults {
    type Item = Video;

    fn next(&mut self) -> Option<Video> {
        self.docs.next().map(normalize_video)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.docs.size_hint()
    }
}

impl ExactSizeIterator for VideoResults {}

/// Parses a search API body into its videos and the total page count
///
/// # Arguments
/// * `body` - Raw JSON body from the search API
/// * `page_size` - Rows per page the request asked for (non-zero)
///
/// # Errors
/// Returns `Json` if the body is not the expected envelope
pub fn parse_search_response(body: &str, page_size: u32) -> Result<(VideoResults, u64)> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    let num_pages = page_count(envelope.response.num_found, page_size);
    Ok((
        VideoResults {
            docs: envelope.response.docs.into_iter(),
        },
        num_pages,
    ))
}

/// Number of pages needed for `num_found` results, rounding up
///
/// A zero page size yields zero pages.
pub fn page_count(num_found: u64, page_size: u32) -> u64 {
    match u64::from(page_size) {
        0 => 0,
        size => num_found.div_ceil(size),
    }
}

/// Maps a raw search document to a [`Video`]
///
/// Prefers `hlsurl` over `streamingurl` and `imageurl` over
/// `thumbnailURL`; empty strings count as missing.
pub fn normalize_video(raw: RawVideo) -> Video {
    let date = raw.publicationdate.as_deref().and_then(|text| {
        let date = parse_publication_date(text);
        if date.is_none() {
            warn!(publicationdate = text, "ignoring unparseable publication date");
        }
        date
    });

    Video {
        title: raw.h1title.unwrap_or_default(),
        description: raw.teaser.unwrap_or_default(),
        url: non_empty(raw.hlsurl).or_else(|| non_empty(raw.streamingurl)),
        thumbnail: non_empty(raw.imageurl).or_else(|| non_empty(raw.thumbnail_url)),
        date,
        duration: raw.duration.as_ref().and_then(duration_seconds),
    }
}

/// Parses the date part of a publication timestamp
///
/// Only the first 19 characters (`YYYY-MM-DDTHH:MM:SS`) are read, so
/// fractional seconds and zone suffixes are ignored. No timezone
/// conversion is applied.
pub fn parse_publication_date(text: &str) -> Option<NaiveDate> {
    let head = text.get(..19).unwrap_or(text);
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Whole seconds from a numeric or numeric-string duration
fn duration_seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
        }
        _ => None,
    }
}
