//! # SRPSession
//!
//! Playback session state machine for SRPlayer.
//!
//! This crate coordinates live radio playback: selecting a channel,
//! starting and pausing its live stream, answering remote play/pause
//! commands, and keeping the externally visible state and the published
//! now-playing metadata consistent with what the audio engine is doing.
//!
//! ## Features
//!
//! - **Derived State**: `Idle | Loading | Playing | Error` computed from
//!   the engine's rate and error, never assigned freely by callers.
//! - **Optimistic Selection**: `play()` reflects the chosen track
//!   immediately, before the engine confirms.
//! - **Provider Traits**: audio route, playback engine, remote commands,
//!   now-playing surface, artwork, and feedback are all trait seams the
//!   host platform implements; tests script them directly.
//! - **Remote Control**: play/pause handlers registered once, holding the
//!   session weakly so the platform never keeps it alive.
//! - **Observable State**: a `tokio::sync::watch` channel for UI layers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use srpsession::{PlaybackSession, Providers};
//!
//! let session = PlaybackSession::new(Providers {
//!     route: platform_route,
//!     engine_factory: platform_engine_factory,
//!     remote: platform_remote_center,
//!     now_playing: platform_now_playing,
//!     artwork: api_client,
//!     feedback: haptics,
//! });
//!
//! // Once per foreground transition
//! session.activate()?;
//!
//! // User picked a channel
//! session.play(track.clone());
//! assert_eq!(session.current_track(), Some(track));
//!
//! // Observe transport state
//! let mut states = session.subscribe_state();
//! while states.changed().await.is_ok() {
//!     println!("state: {:?}", *states.borrow());
//! }
//! ```
//!
//! See the `play_channel` example for a complete runnable walkthrough
//! with a scripted engine.

pub mod error;
pub mod model;
pub mod providers;
pub mod session;

// Re-exports
pub use error::{Result, SessionError};
pub use model::{MediaType, NowPlayingInfo, PlaybackState, PlayableTrack, Rgb};
pub use providers::{
    ActivationOption, ArtworkFetcher, AudioRoute, CategoryOption, EngineFactory, Feedback,
    HandlerStatus, NoArtwork, NoopFeedback, NowPlayingPublisher, PlaybackEngine, RemoteCommand,
    RemoteCommandCenter, RemoteHandler, RouteCategory, RouteMode,
};
pub use session::{PlaybackSession, Providers};
