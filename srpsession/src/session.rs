//! Playback session coordinator
//!
//! This module provides [`PlaybackSession`], the state machine that drives
//! live radio playback: it configures the audio route, owns the playback
//! engine, answers remote transport commands, and keeps the published
//! now-playing snapshot consistent with what the engine is doing.
//!
//! # State derivation
//!
//! The externally visible state is optimistic in two phases: selecting a
//! track is reflected immediately (`current_track` plus the `Loading`
//! state), while the transport state settles asynchronously from what the
//! engine reports (non-zero rate and no error means `Playing`).
//!
//! # Example
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
//! session.activate()?;
//! session.play(track);
//! ```

use crate::error::{Result, SessionError};
use crate::model::{MediaType, NowPlayingInfo, PlaybackState, PlayableTrack};
use crate::providers::{
    ActivationOption, ArtworkFetcher, AudioRoute, EngineFactory, Feedback, HandlerStatus,
    NowPlayingPublisher, PlaybackEngine, RemoteCommand, RemoteCommandCenter, RouteCategory,
    RouteMode,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

/// Provider bundle handed to [`PlaybackSession::new`]
pub struct Providers {
    /// Platform audio route
    pub route: Arc<dyn AudioRoute>,
    /// Playback engine factory
    pub engine_factory: Arc<dyn EngineFactory>,
    /// Remote command surface
    pub remote: Arc<dyn RemoteCommandCenter>,
    /// System now-playing surface
    pub now_playing: Arc<dyn NowPlayingPublisher>,
    /// Artwork fetcher for now-playing snapshots
    pub artwork: Arc<dyn ArtworkFetcher>,
    /// Feedback sink for user-initiated transport changes
    pub feedback: Arc<dyn Feedback>,
}

/// Mutable session state behind the lock
struct SessionState {
    engine: Option<Arc<dyn PlaybackEngine>>,
    current_track: Option<PlayableTrack>,
    playback: PlaybackState,
    remote_registered: bool,
}

struct SessionInner {
    providers: Providers,
    state: Mutex<SessionState>,
    state_tx: watch::Sender<PlaybackState>,
    refresh_generation: AtomicU64,
    runtime: Handle,
}

/// Playback session state machine
///
/// The session is cheap to clone and thread-safe; clones share the same
/// state. Remote command handlers and the end-of-stream listener hold it
/// weakly, so dropping the last clone tears the session down even while
/// the platform still holds registered handlers.
///
/// # Locking
///
/// Internal state lives behind a mutex that is never held across an
/// await point; spawned tasks re-acquire it when they run.
#[derive(Clone)]
pub struct PlaybackSession {
    inner: Arc<SessionInner>,
}

impl PlaybackSession {
    /// Create a session over a provider bundle
    ///
    /// The session captures the current tokio runtime handle for the
    /// fire-and-forget work it spawns (resume, now-playing refresh,
    /// end-of-stream cleanup), so remote handlers can be invoked from
    /// threads outside the runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(providers: Providers) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::Idle);
        Self {
            inner: Arc::new(SessionInner {
                providers,
                state: Mutex::new(SessionState {
                    engine: None,
                    current_track: None,
                    playback: PlaybackState::Idle,
                    remote_registered: false,
                }),
                state_tx,
                refresh_generation: AtomicU64::new(0),
                runtime: Handle::current(),
            }),
        }
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Activate the session
    ///
    /// Configures the audio route for playback, activates it, registers
    /// the remote play/pause handlers, and kicks an asynchronous
    /// now-playing refresh (a no-op when nothing is selected yet).
    ///
    /// Safe to call repeatedly, e.g. every time the host comes to the
    /// foreground: the route calls run each time, but remote handlers are
    /// only registered once.
    ///
    /// # Errors
    ///
    /// Route failures are propagated to the caller and also surface as
    /// [`PlaybackState::Error`] with the failure message.
    pub fn activate(&self) -> Result<()> {
        tracing::info!("Activating playback session");

        let route = &self.inner.providers.route;
        if let Err(err) = route.set_category(RouteCategory::Playback, RouteMode::Default, &[]) {
            self.enter_error(&err);
            return Err(err);
        }
        if let Err(err) = route.set_active(true, &[ActivationOption::NotifyOthersOnDeactivation]) {
            self.enter_error(&err);
            return Err(err);
        }

        self.register_remote_handlers();
        self.spawn_refresh();
        self.recompute_state();
        Ok(())
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Select a track and start playing it
    ///
    /// The selection is visible immediately through [`current_track`] and
    /// the `Loading` state; the transport state settles to `Playing` (or
    /// `Idle`/`Error`) once the engine confirms asynchronously.
    ///
    /// The engine is created lazily on the first call and retargeted on
    /// later ones.
    ///
    /// [`current_track`]: PlaybackSession::current_track
    pub fn play(&self, track: PlayableTrack) {
        tracing::debug!("Playing {}", track.title);
        self.inner.providers.feedback.impact();

        {
            let mut state = self.inner.state.lock().unwrap();
            // A newer selection invalidates any in-flight artwork refresh.
            // Bumped under the lock so a refresh can never observe the new
            // generation paired with the old selection.
            self.inner.refresh_generation.fetch_add(1, Ordering::SeqCst);
            let engine = state.engine.clone();
            match engine {
                Some(engine) => engine.replace_source(&track.url),
                None => {
                    let engine = self.inner.providers.engine_factory.create(&track.url);
                    self.spawn_ended_listener(&engine);
                    state.engine = Some(engine);
                }
            }
            state.current_track = Some(track);
            self.transition(&mut state, PlaybackState::Loading);
        }

        self.spawn_resume();
    }

    /// Pause playback
    ///
    /// The current selection is retained: pause is not deselect, and a
    /// remote play command resumes the same stream.
    pub fn pause(&self) {
        tracing::debug!("Pausing playback");
        self.inner.providers.feedback.impact();
        if let Some(engine) = self.engine() {
            engine.pause();
        }
        self.recompute_state();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// True when `track` is the current selection and it is playing
    ///
    /// Track comparison ignores the accent color, so a refetched channel
    /// with a retouched color still matches.
    pub fn is_playing(&self, track: &PlayableTrack) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.playback.is_playing() && state.current_track.as_ref() == Some(track)
    }

    /// Current selection, if any
    pub fn current_track(&self) -> Option<PlayableTrack> {
        self.inner.state.lock().unwrap().current_track.clone()
    }

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.inner.state.lock().unwrap().playback.clone()
    }

    /// Subscribe to transport state changes
    ///
    /// Intermediate transitions may be coalesced; the receiver always
    /// observes the latest state.
    pub fn subscribe_state(&self) -> watch::Receiver<PlaybackState> {
        self.inner.state_tx.subscribe()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Resume the engine and settle the derived state
    async fn resume(&self) {
        let engine = match self.engine() {
            Some(engine) => engine,
            None => return,
        };
        engine.play();
        self.recompute_state();
        self.refresh_now_playing().await;
    }

    /// Rebuild and publish the now-playing snapshot
    ///
    /// No-op unless both an engine and a selection exist. Artwork is
    /// fetched best-effort; a failed fetch still publishes the snapshot,
    /// just without artwork.
    async fn refresh_now_playing(&self) {
        // The generation is read under the same lock play() bumps it
        // under, so it is always paired with the selection it guards.
        let (generation, engine, track) = {
            let state = self.inner.state.lock().unwrap();
            match (&state.engine, &state.current_track) {
                (Some(engine), Some(track)) => (
                    self.inner.refresh_generation.load(Ordering::SeqCst),
                    Arc::clone(engine),
                    track.clone(),
                ),
                _ => return,
            }
        };

        let artwork = match &track.artwork_url {
            Some(url) => match self.inner.providers.artwork.fetch(url).await {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    tracing::warn!("Artwork fetch failed for {}: {}", url, err);
                    None
                }
            },
            None => None,
        };

        // Re-taking the lock makes the staleness check and the publish one
        // step: a concurrent selection either lands before (this refresh is
        // stale and drops out) or waits until the snapshot is out.
        let _state = self.inner.state.lock().unwrap();
        if self.inner.refresh_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping stale now-playing refresh for {}", track.title);
            return;
        }

        let info = NowPlayingInfo {
            title: track.title.clone(),
            artist: track.artist.clone(),
            is_live_stream: true,
            playback_rate: engine.rate(),
            media_type: MediaType::Audio,
            artwork,
        };
        self.inner.providers.now_playing.publish(Some(info));
    }

    /// Derive the transport state from the engine and notify watchers
    fn recompute_state(&self) {
        let mut state = self.inner.state.lock().unwrap();
        let next = match &state.engine {
            Some(engine) => match engine.error() {
                Some(message) => PlaybackState::Error(message),
                None if engine.rate() != 0.0 => PlaybackState::Playing,
                None => PlaybackState::Idle,
            },
            None => PlaybackState::Idle,
        };
        self.transition(&mut state, next);
    }

    /// Update the stored state and the watch channel together
    fn transition(&self, state: &mut SessionState, next: PlaybackState) {
        if state.playback != next {
            tracing::debug!("Playback state: {:?} -> {:?}", state.playback, next);
            state.playback = next.clone();
            self.inner.state_tx.send_replace(next);
        }
    }

    fn enter_error(&self, err: &SessionError) {
        let mut state = self.inner.state.lock().unwrap();
        self.transition(&mut state, PlaybackState::Error(err.to_string()));
    }

    fn engine(&self) -> Option<Arc<dyn PlaybackEngine>> {
        self.inner.state.lock().unwrap().engine.clone()
    }

    fn spawn_resume(&self) {
        let session = self.clone();
        self.inner.runtime.spawn(async move {
            session.resume().await;
        });
    }

    fn spawn_refresh(&self) {
        let session = self.clone();
        self.inner.runtime.spawn(async move {
            session.refresh_now_playing().await;
        });
    }

    /// Install the remote play/pause handlers exactly once
    ///
    /// Handlers hold the session weakly: the command center outlives the
    /// session and must not keep it alive. After the session is dropped,
    /// invocations report [`HandlerStatus::Failed`].
    fn register_remote_handlers(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.remote_registered {
                return;
            }
            state.remote_registered = true;
        }

        let weak = Arc::downgrade(&self.inner);
        self.inner.providers.remote.set_handler(
            RemoteCommand::Pause,
            Box::new(move || match weak.upgrade() {
                Some(inner) => {
                    PlaybackSession { inner }.pause();
                    HandlerStatus::Success
                }
                None => HandlerStatus::Failed,
            }),
        );

        let weak = Arc::downgrade(&self.inner);
        self.inner.providers.remote.set_handler(
            RemoteCommand::Play,
            Box::new(move || match weak.upgrade() {
                Some(inner) => {
                    PlaybackSession { inner }.spawn_resume();
                    HandlerStatus::Success
                }
                None => HandlerStatus::Failed,
            }),
        );
    }

    /// Watch the engine's end-of-source events for the session's lifetime
    fn spawn_ended_listener(&self, engine: &Arc<dyn PlaybackEngine>) {
        let mut events = engine.played_to_end();
        let weak = Arc::downgrade(&self.inner);
        self.inner.runtime.spawn(async move {
            loop {
                match events.recv().await {
                    Ok(()) => {
                        let inner = match weak.upgrade() {
                            Some(inner) => inner,
                            None => break,
                        };
                        PlaybackSession { inner }.handle_played_to_end();
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("End-of-stream listener lagged by {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// Tear down after the stream ran out
    ///
    /// Deactivation failures are logged and swallowed; there is nothing
    /// to resume at this point.
    fn handle_played_to_end(&self) {
        tracing::debug!("Stream played to end");

        if let Err(err) = self.inner.providers.route.set_active(false, &[]) {
            tracing::warn!("Audio route deactivation failed: {}", err);
        }

        {
            let mut state = self.inner.state.lock().unwrap();
            state.current_track = None;
        }
        self.recompute_state();
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("PlaybackSession")
            .field("state", &state.playback)
            .field(
                "current_track",
                &state.current_track.as_ref().map(|t| t.title.as_str()),
            )
            .field("has_engine", &state.engine.is_some())
            .finish()
    }
}
