//! Example: Play a live channel through the playback session
//!
//! The channel listing and artwork come from the real Sveriges Radio API;
//! the audio engine is a stub that only tracks its rate, so nothing is
//! actually decoded.
//!
//! Run with: cargo run -p srpapi --example play_live

use srpapi::{ApiClient, SrDirectory};
use srpsession::{
    ActivationOption, AudioRoute, CategoryOption, EngineFactory, NoopFeedback, NowPlayingInfo,
    NowPlayingPublisher, PlaybackEngine, PlaybackSession, Providers, RemoteCommand,
    RemoteCommandCenter, RemoteHandler, RouteCategory, RouteMode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use url::Url;

struct StubRoute;

impl AudioRoute for StubRoute {
    fn set_category(
        &self,
        _category: RouteCategory,
        _mode: RouteMode,
        _options: &[CategoryOption],
    ) -> srpsession::Result<()> {
        Ok(())
    }

    fn set_active(&self, _active: bool, _options: &[ActivationOption]) -> srpsession::Result<()> {
        Ok(())
    }
}

struct StubEngine {
    rate: Mutex<f32>,
    ended_tx: broadcast::Sender<()>,
}

impl PlaybackEngine for StubEngine {
    fn replace_source(&self, _url: &Url) {}

    fn play(&self) {
        *self.rate.lock().unwrap() = 1.0;
    }

    fn pause(&self) {
        *self.rate.lock().unwrap() = 0.0;
    }

    fn rate(&self) -> f32 {
        *self.rate.lock().unwrap()
    }

    fn error(&self) -> Option<String> {
        None
    }

    fn played_to_end(&self) -> broadcast::Receiver<()> {
        self.ended_tx.subscribe()
    }
}

struct StubEngineFactory;

impl EngineFactory for StubEngineFactory {
    fn create(&self, _url: &Url) -> Arc<dyn PlaybackEngine> {
        let (ended_tx, _) = broadcast::channel(4);
        Arc::new(StubEngine {
            rate: Mutex::new(0.0),
            ended_tx,
        })
    }
}

struct StubRemote;

impl RemoteCommandCenter for StubRemote {
    fn set_handler(&self, _command: RemoteCommand, _handler: RemoteHandler) {}
}

#[derive(Default)]
struct StdoutPublisher {
    slot: Mutex<Option<NowPlayingInfo>>,
}

impl NowPlayingPublisher for StdoutPublisher {
    fn publish(&self, info: Option<NowPlayingInfo>) {
        if let Some(info) = &info {
            let artwork = info
                .artwork
                .as_ref()
                .map(|bytes| format!("{} bytes", bytes.len()))
                .unwrap_or_else(|| "none".to_string());
            println!(
                "now playing: {} (rate {}, artwork {})",
                info.title, info.playback_rate, artwork
            );
        }
        *self.slot.lock().unwrap() = info;
    }

    fn current(&self) -> Option<NowPlayingInfo> {
        self.slot.lock().unwrap().clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = ApiClient::new()?;
    let directory = SrDirectory::new(client.clone());

    let tracks = directory.tracks().await?;
    let track = tracks
        .into_iter()
        .next()
        .ok_or("no playable channels in the listing")?;

    println!("Playing {} ({})", track.title, track.url);

    let session = PlaybackSession::new(Providers {
        route: Arc::new(StubRoute),
        engine_factory: Arc::new(StubEngineFactory),
        remote: Arc::new(StubRemote),
        now_playing: Arc::new(StdoutPublisher::default()),
        artwork: Arc::new(client),
        feedback: Arc::new(NoopFeedback),
    });

    session.activate()?;
    session.play(track.clone());

    // Let the engine settle and the now-playing snapshot publish
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("state: {:?}", session.state());
    println!("is playing {}: {}", track.title, session.is_playing(&track));

    session.pause();
    println!("state after pause: {:?}", session.state());

    Ok(())
}
