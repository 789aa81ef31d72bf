//! Data models for the Sveriges Radio API
//!
//! The channel listing is XML. quick-xml's serde support maps `@`-renamed
//! fields to attributes and repeated `<channel>` elements into a Vec.

use serde::{Deserialize, Serialize};
use srpsession::{PlayableTrack, Rgb};
use url::Url;

// ============================================================================
// Channel Listing
// ============================================================================

/// Root response document (`<sr>`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SrResponse {
    /// Channel listing
    pub channels: Channels,
}

/// The `<channels>` collection element
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Channels {
    /// Current page, when the API paginates
    #[serde(rename = "@page")]
    pub page: Option<u32>,
    /// Total number of channels
    #[serde(rename = "@totalhits")]
    pub total_hits: Option<u32>,
    /// Channel entries
    #[serde(rename = "channel", default)]
    pub channels: Vec<Channel>,
}

/// A single channel entry
///
/// Everything except the `id` attribute is optional in the wire format;
/// [`Channel::to_track`] enforces what playback actually needs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Channel {
    /// Channel id (attribute)
    #[serde(rename = "@id")]
    pub id: u32,
    /// Display name (attribute)
    #[serde(rename = "@name")]
    pub name: Option<String>,
    /// Channel image URL
    pub image: Option<String>,
    /// Accent color as a hex string (e.g. "31a1bd")
    pub color: Option<String>,
    /// Channel tagline
    pub tagline: Option<String>,
    /// Channel site URL
    #[serde(rename = "siteurl")]
    pub site_url: Option<String>,
    /// Live stream descriptor
    #[serde(rename = "liveaudio")]
    pub live_audio: Option<LiveAudio>,
}

/// The `<liveaudio>` element carrying the stream URL
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LiveAudio {
    /// Stream id (attribute)
    #[serde(rename = "@id")]
    pub id: Option<u32>,
    /// Live stream URL
    pub url: Option<String>,
}

impl Channel {
    /// The live stream URL, if the channel carries one
    pub fn stream_url(&self) -> Option<&str> {
        self.live_audio.as_ref()?.url.as_deref()
    }

    /// Convert the channel into a playable track
    ///
    /// Returns `None` when the channel lacks a parseable stream URL or a
    /// display name. A malformed image URL or color degrades to `None` on
    /// the track instead of failing the conversion.
    pub fn to_track(&self) -> Option<PlayableTrack> {
        let url = Url::parse(self.stream_url()?).ok()?;
        let name = self.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }

        let mut track = PlayableTrack::new(url, name);
        track.artist = self.tagline.clone();
        track.artwork_url = self.image.as_deref().and_then(|raw| Url::parse(raw).ok());
        track.color = self.color.as_deref().and_then(Rgb::from_hex);
        Some(track)
    }
}
