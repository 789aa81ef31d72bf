//! Sveriges Radio client library for SRPlayer
//!
//! This crate provides a Rust client for the public Sveriges Radio channel
//! API: the channel listing, live stream URLs, and channel artwork.
//!
//! # Features
//!
//! - **Channel Listing**: Fetch all channels with names, taglines, accent
//!   colors, and live stream URLs (XML wire format)
//! - **Directory Caching**: [`SrDirectory`] caches the listing with a
//!   configurable TTL
//! - **Track Conversion**: [`Channel::to_track`] builds the playable tracks
//!   the `srpsession` state machine consumes
//! - **Artwork Fetching**: [`ApiClient`] implements
//!   `srpsession::ArtworkFetcher`, so the same HTTP stack serves channel
//!   images for now-playing snapshots
//!
//! # Example
//!
//! ```no_run
//! use srpapi::{ApiClient, SrDirectory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = SrDirectory::new(ApiClient::new()?);
//!
//!     for track in directory.tracks().await? {
//!         println!("{}: {}", track.title, track.url);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Playback Integration
//!
//! The directory and the playback session compose without glue code: the
//! client is the session's artwork fetcher, and the tracks it produces are
//! what `PlaybackSession::play` takes.
//!
//! ```rust,ignore
//! use srpapi::{ApiClient, SrDirectory};
//! use srpsession::{PlaybackSession, Providers};
//! use std::sync::Arc;
//!
//! let client = ApiClient::new()?;
//! let directory = SrDirectory::new(client.clone());
//!
//! let session = PlaybackSession::new(Providers {
//!     route: platform_route,
//!     engine_factory: platform_engine_factory,
//!     remote: platform_remote_center,
//!     now_playing: platform_now_playing,
//!     artwork: Arc::new(client),
//!     feedback: haptics,
//! });
//!
//! session.activate()?;
//! if let Some(track) = directory.tracks().await?.into_iter().next() {
//!     session.play(track);
//! }
//! ```

pub mod client;
pub mod directory;
pub mod error;
pub mod models;

// Re-exports
pub use client::{
    ApiClient, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use directory::{ChannelDirectory, SrDirectory, DEFAULT_CACHE_TTL_SECS};
pub use error::{Error, Result};
pub use models::{Channel, Channels, LiveAudio, SrResponse};
