//! Registry of the live channels
//!
//! The channel set is fixed. `epg_index` is the channel's position in
//! the guide feed and has to follow that feed's ordering.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::url::build_thumbnail_url;

/// A live channel
///
/// Serializes with its full `thumbnail` URL next to the raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel {
    pub name: &'static str,
    /// Identifier used by the AVS backend
    pub id: u32,
    /// Position in the guide feed's channel list (not the id)
    pub epg_index: usize,
    /// Logo filename on the channel logo CDN
    pub logo: &'static str,
}

impl Channel {
    /// Logo URL for the channel
    pub fn thumbnail(&self) -> String {
        build_thumbnail_url(self.logo)
    }
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Channel", 5)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("epg_index", &self.epg_index)?;
        state.serialize_field("logo", self.logo)?;
        state.serialize_field("thumbnail", &self.thumbnail())?;
        state.end()
    }
}

static CHANNELS: [Channel; 5] = [
    Channel {
        name: "BT Sport 1",
        id: 2020,
        epg_index: 2,
        logo: "BTSPORT_1_201805110826.jpg",
    },
    Channel {
        name: "BT Sport 2",
        id: 2021,
        epg_index: 4,
        logo: "BTSPORT_2_201805110826.jpg",
    },
    Channel {
        name: "BT Sport 3",
        id: 2030,
        epg_index: 9,
        logo: "BTSPORT_3_201805110828.jpg",
    },
    Channel {
        name: "BT Sport//ESPN",
        id: 2022,
        epg_index: 13,
        logo: "BTSPORT_ESPN_201805110829.jpg",
    },
    Channel {
        name: "BoxNation",
        id: 2029,
        epg_index: 5,
        logo: "BoxNation_Lozenge_201804201100.jpg",
    },
];

/// All channels in display order
pub fn channels() -> &'static [Channel] {
    &CHANNELS
}

/// Channels keyed on the string form of their id
///
/// Built fresh on every call.
pub fn channels_by_id() -> HashMap<String, &'static Channel> {
    CHANNELS
        .iter()
        .map(|channel| (channel.id.to_string(), channel))
        .collect()
}

/// Looks up a channel by its numeric id
pub fn channel_by_id(id: u32) -> Option<&'static Channel> {
    CHANNELS.iter().find(|channel| channel.id == id)
}
