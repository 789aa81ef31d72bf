//! Domain model for the playback session
//!
//! This module contains the track, state, and now-playing types the
//! session coordinator works with. Directory crates convert their wire
//! formats into [`PlayableTrack`]; hosts observe [`PlaybackState`] and
//! the published [`NowPlayingInfo`] snapshots.

use bytes::Bytes;
use url::Url;

// ============================================================================
// Tracks
// ============================================================================

/// A playable live channel, as consumed by the session
///
/// Tracks are built by directory layers from their wire formats; the
/// stream URL is parsed at construction so the session never handles
/// malformed URLs.
#[derive(Debug, Clone)]
pub struct PlayableTrack {
    /// Live stream URL
    pub url: Url,
    /// Display name (channel name)
    pub title: String,
    /// Secondary display line (channel tagline)
    pub artist: Option<String>,
    /// Channel artwork URL
    pub artwork_url: Option<Url>,
    /// Accent color for UI theming
    pub color: Option<Rgb>,
}

impl PlayableTrack {
    /// Create a track with just a stream URL and a title
    pub fn new(url: Url, title: impl Into<String>) -> Self {
        Self {
            url,
            title: title.into(),
            artist: None,
            artwork_url: None,
            color: None,
        }
    }
}

/// Equality covers the identity of the stream, not its presentation:
/// the accent color is excluded so a directory refresh with a retouched
/// color still matches the playing selection.
impl PartialEq for PlayableTrack {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && self.title == other.title
            && self.artist == other.artist
            && self.artwork_url == other.artwork_url
    }
}

impl Eq for PlayableTrack {}

// ============================================================================
// Playback State
// ============================================================================

/// Externally visible transport state
///
/// `Playing` and `Idle` are derived from the engine (rate and error) by
/// the session, never assigned directly by callers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No transport active
    #[default]
    Idle,
    /// A track is selected but the engine has not confirmed playback yet
    Loading,
    /// The engine reports a non-zero rate and no error
    Playing,
    /// Session activation or engine failure, with display text
    Error(String),
}

impl PlaybackState {
    /// True when the state is `Playing`
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// True when the state is `Error`
    pub fn is_error(&self) -> bool {
        matches!(self, PlaybackState::Error(_))
    }
}

// ============================================================================
// Now Playing
// ============================================================================

/// Media type hint carried in the now-playing snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    /// Audio content (the only type a radio session produces)
    #[default]
    Audio,
}

/// Snapshot published to the system now-playing surface
///
/// Snapshots are published wholesale: each publish replaces the previous
/// one entirely, so a snapshot without artwork clears any artwork a
/// previous snapshot carried.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingInfo {
    /// Track title (channel name)
    pub title: String,
    /// Artist line (channel tagline)
    pub artist: Option<String>,
    /// Live stream flag (always true for radio channels)
    pub is_live_stream: bool,
    /// Engine playback rate at publish time
    pub playback_rate: f32,
    /// Media type hint
    pub media_type: MediaType,
    /// Artwork image payload, when the fetch succeeded
    pub artwork: Option<Bytes>,
}

// ============================================================================
// Colors
// ============================================================================

/// RGB accent color parsed from the directory's hex notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Rgb {
    /// Parse from hex notation, with or without a leading `#`
    ///
    /// # Example
    ///
    /// ```
    /// use srpsession::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("31a1bd"), Some(Rgb { r: 0x31, g: 0xa1, b: 0xbd }));
    /// assert_eq!(Rgb::from_hex("#31a1bd"), Some(Rgb { r: 0x31, g: 0xa1, b: 0xbd }));
    /// assert_eq!(Rgb::from_hex("not a color"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}
