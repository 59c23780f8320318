//! Core data types for the BT Sport resolver
//!
//! Contains the records handed back to callers. All of them are plain
//! values built fresh per request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An on-demand video from the search API
///
/// `title` and `description` are always present (possibly empty); the
/// remaining fields are independently optional since the API omits them
/// for unpublished or badly formatted entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Headline title
    pub title: String,

    /// Teaser text
    pub description: String,

    /// Playable URL, HLS preferred over the generic streaming URL
    pub url: Option<String>,

    /// Image URL, full image preferred over the small thumbnail
    pub thumbnail: Option<String>,

    /// Publication date (time of day dropped)
    pub date: Option<NaiveDate>,

    /// Duration in seconds
    pub duration: Option<u64>,
}

/// A video category listed on the site's video hub
///
/// The default listing has no title. Ordering puts it ahead of every
/// titled category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Display title, `None` for the default listing
    pub title: Option<String>,

    /// Site-relative path of the category page (e.g. "/football/videos-01364228997417")
    pub path: String,
}

impl Category {
    /// Whether this is the site's default (untitled) listing
    pub fn is_default(&self) -> bool {
        self.title.is_none()
    }
}

/// A single programme from the EPG feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub synopsis: String,
    /// Start time in the requested timezone, formatted "HH:MM"
    pub start: String,
}

/// Now/next guide information for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epg {
    pub now: Program,
    pub next: Program,
}
