//! Programme guide feed parser
//!
//! The guide feed lists every channel in one document; a channel is
//! addressed by its position in the `channels` array.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{BtSportError, Result};
use crate::types::{Epg, Program};

/// Timezone used when the caller does not ask for one
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;

/// Entries stay raw so a malformed channel only fails its own lookup
#[derive(Debug, Deserialize)]
struct EpgFeed {
    channels: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChannelGuide {
    now: Option<RawProgram>,
    next: Option<RawProgram>,
}

#[derive(Debug, Deserialize)]
struct RawProgram {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    synopsis: Option<String>,
    start: String,
}

/// Parses an IANA timezone name such as "Europe/London"
///
/// # Errors
/// Returns `InvalidArgument` for unknown names
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BtSportError::InvalidArgument(format!("unknown timezone {:?}", name)))
}

/// Extracts now/next for the channel at `epg_index` from the full feed
///
/// # Errors
/// - `ParseError` if the index is past the end of the feed, a programme
///   is missing or a start time is malformed
/// - `Json` if the body is not the expected feed
pub fn parse_epg(body: &str, epg_index: usize, timezone: Tz) -> Result<Epg> {
    let feed: EpgFeed = serde_json::from_str(body)?;
    let channel_count = feed.channels.len();

    let entry = feed.channels.into_iter().nth(epg_index).ok_or_else(|| {
        BtSportError::ParseError(format!(
            "EPG index {} out of range, feed has {} channels",
            epg_index, channel_count
        ))
    })?;
    let guide: ChannelGuide = serde_json::from_value(entry)?;

    Ok(Epg {
        now: to_program(guide.now, "now", timezone)?,
        next: to_program(guide.next, "next", timezone)?,
    })
}

fn to_program(raw: Option<RawProgram>, slot: &str, timezone: Tz) -> Result<Program> {
    let raw = raw.ok_or_else(|| {
        BtSportError::ParseError(format!("EPG entry has no {} programme", slot))
    })?;
    Ok(Program {
        title: raw.title.unwrap_or_default(),
        synopsis: raw.synopsis.unwrap_or_default(),
        start: localise(&raw.start, timezone)?,
    })
}

/// Converts a feed timestamp (`YYYY-MM-DDTHH:MM:SSZ`, UTC) to local "HH:MM"
///
/// # Example
/// ```
/// use btsport_core::parser::localise;
/// let start = localise("2021-06-01T18:30:00Z", chrono_tz::Europe::London).unwrap();
/// assert_eq!(start, "19:30");
/// ```
pub fn localise(timestamp: &str, timezone: Tz) -> Result<String> {
    let naive = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%SZ").map_err(|e| {
        BtSportError::ParseError(format!("invalid EPG timestamp {:?}: {}", timestamp, e))
    })?;
    Ok(Utc
        .from_utc_datetime(&naive)
        .with_timezone(&timezone)
        .format("%H:%M")
        .to_string())
}
