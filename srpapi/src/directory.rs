//! Channel directory with TTL caching
//!
//! This module provides [`SrDirectory`], a higher-level layer over
//! [`ApiClient`] that caches the channel listing and converts entries
//! into playable tracks.
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
//!     // Cached after the first call
//!     for track in directory.tracks().await? {
//!         println!("{}: {}", track.title, track.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Channel;
use srpsession::PlayableTrack;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Default channel-list cache TTL (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Cache entry for the channel listing
#[derive(Debug, Clone)]
struct CachedChannels {
    /// Cached listing
    channels: Vec<Channel>,
    /// When the cache should be invalidated
    valid_until: Instant,
}

impl CachedChannels {
    fn new(channels: Vec<Channel>, ttl: Duration) -> Self {
        Self {
            channels,
            valid_until: Instant::now() + ttl,
        }
    }

    fn is_valid(&self) -> bool {
        Instant::now() < self.valid_until
    }
}

/// Channel directory abstraction
///
/// Playback hosts depend on this trait rather than on the concrete HTTP
/// stack, so tests can serve a scripted listing.
#[async_trait::async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// The channel listing, possibly served from a cache
    async fn fetch_channels(&self) -> Result<Vec<Channel>>;
}

/// Sveriges Radio channel directory with automatic caching
///
/// Wraps an [`ApiClient`] and adds:
/// - Channel listing caching (in-memory, fixed TTL)
/// - Conversion into playable tracks
///
/// # Caching Strategy
///
/// The full listing is cached for [`DEFAULT_CACHE_TTL_SECS`] seconds
/// (overridable via [`SrDirectory::with_ttl`]). A valid cache serves
/// without a network round trip; expiry refetches and replaces it.
///
/// # Thread Safety
///
/// The directory is thread-safe (Clone + Send + Sync) and can be shared
/// across async tasks; clones share the same cache.
#[derive(Debug, Clone)]
pub struct SrDirectory {
    /// Underlying HTTP client
    client: ApiClient,
    /// Cache TTL
    ttl: Duration,
    /// In-memory cache for the channel listing (thread-safe)
    cache: Arc<RwLock<Option<CachedChannels>>>,
}

impl SrDirectory {
    /// Create a directory over a client, with the default TTL
    pub fn new(client: ApiClient) -> Self {
        Self::with_ttl(client, Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    /// Create a directory with a custom cache TTL
    pub fn with_ttl(client: ApiClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ========================================================================
    // Channel Listing (with automatic caching)
    // ========================================================================

    /// Get the channel listing, using the cache if valid
    pub async fn channels(&self) -> Result<Vec<Channel>> {
        {
            let cache = self.cache.read().unwrap();
            if let Some(entry) = cache.as_ref() {
                if entry.is_valid() {
                    tracing::debug!("Using {} cached channels", entry.channels.len());
                    return Ok(entry.channels.clone());
                }
            }
        }

        self.refresh().await
    }

    /// Force refresh of the channel listing (bypass cache)
    pub async fn refresh(&self) -> Result<Vec<Channel>> {
        tracing::info!("Fetching channel listing");

        let channels = self.client.channels().await?;

        {
            let mut cache = self.cache.write().unwrap();
            *cache = Some(CachedChannels::new(channels.clone(), self.ttl));
        }

        tracing::info!("Cached {} channels", channels.len());

        Ok(channels)
    }

    /// Drop the cache
    ///
    /// Forces the next `channels()` call to refetch the listing.
    pub fn invalidate(&self) {
        *self.cache.write().unwrap() = None;
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// The playable tracks of the listing
    ///
    /// Channels without a usable stream URL or name are skipped.
    pub async fn tracks(&self) -> Result<Vec<PlayableTrack>> {
        let channels = self.channels().await?;
        Ok(channels.iter().filter_map(Channel::to_track).collect())
    }
}

#[async_trait::async_trait]
impl ChannelDirectory for SrDirectory {
    async fn fetch_channels(&self) -> Result<Vec<Channel>> {
        self.channels().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_expiry() {
        let entry = CachedChannels::new(vec![], Duration::from_secs(60));
        assert!(entry.is_valid());

        let expired = CachedChannels::new(vec![], Duration::ZERO);
        assert!(!expired.is_valid());
    }

    #[test]
    fn test_invalidate_drops_cache() {
        let directory = SrDirectory::new(ApiClient::new().unwrap());
        *directory.cache.write().unwrap() =
            Some(CachedChannels::new(vec![], Duration::from_secs(60)));

        directory.invalidate();
        assert!(directory.cache.read().unwrap().is_none());
    }
}
