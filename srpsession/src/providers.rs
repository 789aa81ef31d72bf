//! Collaborator traits for the playback session
//!
//! The session coordinates platform facilities it does not own: the audio
//! route, the stream playback engine, the remote command surface, the
//! system now-playing display, artwork retrieval, and user feedback. Each
//! facility is a trait implemented by the host platform layer; tests
//! script them directly.
//!
//! # Thread Safety
//!
//! All providers must be `Send + Sync`: the session shares them across
//! the tasks it spawns (resume, now-playing refresh, end-of-stream
//! cleanup).

use crate::error::Result;
use crate::model::NowPlayingInfo;
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::broadcast;
use url::Url;

// ============================================================================
// Audio Route
// ============================================================================

/// Audio route category requested by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
    /// Long-form playback that should silence other audio
    Playback,
}

/// Audio route mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteMode {
    /// Default route behavior
    #[default]
    Default,
}

/// Options applied when configuring the route category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOption {
    /// Mix with audio from other applications instead of interrupting it
    MixWithOthers,
    /// Duck other audio instead of interrupting it
    DuckOthers,
}

/// Options applied when changing the route's active flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOption {
    /// Tell interrupted applications they may resume once the route
    /// deactivates
    NotifyOthersOnDeactivation,
}

/// Platform audio route facade
///
/// Mirrors the shape of mobile audio session APIs: a category describing
/// the playback intent, and an active flag arbitrating the route between
/// applications. Both calls can be rejected by the platform; the session
/// surfaces rejections through [`PlaybackState::Error`].
///
/// [`PlaybackState::Error`]: crate::model::PlaybackState::Error
pub trait AudioRoute: Send + Sync {
    /// Configure the route for a category and mode
    fn set_category(
        &self,
        category: RouteCategory,
        mode: RouteMode,
        options: &[CategoryOption],
    ) -> Result<()>;

    /// Activate or deactivate the route
    fn set_active(&self, active: bool, options: &[ActivationOption]) -> Result<()>;
}

// ============================================================================
// Playback Engine
// ============================================================================

/// Live stream playback engine
///
/// One engine is created lazily on the first play and retargeted with
/// [`replace_source`] for later selections. Transport calls are
/// non-blocking; the engine reports its effective state through
/// [`rate`] and [`error`], which the session polls after every
/// transport change.
///
/// [`replace_source`]: PlaybackEngine::replace_source
/// [`rate`]: PlaybackEngine::rate
/// [`error`]: PlaybackEngine::error
pub trait PlaybackEngine: Send + Sync {
    /// Point the engine at a different stream without recreating it
    fn replace_source(&self, url: &Url);

    /// Start or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Current playback rate (0.0 when stopped)
    fn rate(&self) -> f32;

    /// Engine fault, if any
    fn error(&self) -> Option<String>;

    /// Subscribe to the end-of-source notification
    ///
    /// Live streams normally never end; the event fires when a finite
    /// source runs out or the stream is torn down server-side.
    fn played_to_end(&self) -> broadcast::Receiver<()>;
}

/// Factory building a playback engine for a stream URL
pub trait EngineFactory: Send + Sync {
    /// Build an engine targeting `url`
    fn create(&self, url: &Url) -> Arc<dyn PlaybackEngine>;
}

// ============================================================================
// Remote Commands
// ============================================================================

/// Remote transport command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteCommand {
    /// Remote play / resume
    Play,
    /// Remote pause
    Pause,
}

/// Outcome reported back to the remote command surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStatus {
    /// The command was accepted
    Success,
    /// The command could not be handled (e.g. the session is gone)
    Failed,
}

/// Handler invoked for a remote command
pub type RemoteHandler = Box<dyn Fn() -> HandlerStatus + Send + Sync>;

/// Remote command surface (lock screen, headset buttons, car controls)
pub trait RemoteCommandCenter: Send + Sync {
    /// Install the handler for a command, replacing any previous one
    fn set_handler(&self, command: RemoteCommand, handler: RemoteHandler);
}

// ============================================================================
// Now Playing
// ============================================================================

/// System now-playing surface
///
/// The snapshot is replaced wholesale on every publish (last writer
/// wins); `None` clears it.
pub trait NowPlayingPublisher: Send + Sync {
    /// Replace the published snapshot
    fn publish(&self, info: Option<NowPlayingInfo>);

    /// Read back the current snapshot
    fn current(&self) -> Option<NowPlayingInfo>;
}

// ============================================================================
// Artwork
// ============================================================================

/// Artwork retrieval for the now-playing surface
#[async_trait::async_trait]
pub trait ArtworkFetcher: Send + Sync {
    /// Fetch raw image bytes
    ///
    /// Failures are non-fatal: the session logs them and publishes the
    /// snapshot without artwork.
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

/// Artwork fetcher that always reports no artwork, for hosts without one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArtwork;

#[async_trait::async_trait]
impl ArtworkFetcher for NoArtwork {
    async fn fetch(&self, _url: &Url) -> Result<Bytes> {
        Err(crate::error::SessionError::artwork(anyhow::anyhow!(
            "no artwork fetcher configured"
        )))
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Physical or UI feedback on user-initiated transport changes
pub trait Feedback: Send + Sync {
    /// Emit one feedback impulse
    fn impact(&self);
}

/// Feedback sink that does nothing, for headless hosts and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFeedback;

impl Feedback for NoopFeedback {
    fn impact(&self) {}
}
