//! Example: drive the playback session with console-backed providers
//!
//! Run with: cargo run -p srpsession --example play_channel

use srpsession::{
    ActivationOption, AudioRoute, CategoryOption, EngineFactory, NoArtwork, NoopFeedback,
    NowPlayingInfo, NowPlayingPublisher, PlaybackEngine, PlaybackSession, PlayableTrack,
    Providers, RemoteCommand, RemoteCommandCenter, RemoteHandler, RouteCategory, RouteMode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use url::Url;

struct ConsoleRoute;

impl AudioRoute for ConsoleRoute {
    fn set_category(
        &self,
        category: RouteCategory,
        mode: RouteMode,
        _options: &[CategoryOption],
    ) -> srpsession::Result<()> {
        println!("route: category {:?}, mode {:?}", category, mode);
        Ok(())
    }

    fn set_active(&self, active: bool, _options: &[ActivationOption]) -> srpsession::Result<()> {
        println!("route: active {}", active);
        Ok(())
    }
}

struct ConsoleEngine {
    rate: Mutex<f32>,
    ended_tx: broadcast::Sender<()>,
}

impl PlaybackEngine for ConsoleEngine {
    fn replace_source(&self, url: &Url) {
        println!("engine: source {}", url);
    }

    fn play(&self) {
        *self.rate.lock().unwrap() = 1.0;
        println!("engine: play");
    }

    fn pause(&self) {
        *self.rate.lock().unwrap() = 0.0;
        println!("engine: pause");
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

struct ConsoleFactory;

impl EngineFactory for ConsoleFactory {
    fn create(&self, url: &Url) -> Arc<dyn PlaybackEngine> {
        println!("engine: created for {}", url);
        let (ended_tx, _) = broadcast::channel(4);
        Arc::new(ConsoleEngine {
            rate: Mutex::new(0.0),
            ended_tx,
        })
    }
}

struct ConsoleRemote;

impl RemoteCommandCenter for ConsoleRemote {
    fn set_handler(&self, command: RemoteCommand, _handler: RemoteHandler) {
        println!("remote: handler registered for {:?}", command);
    }
}

#[derive(Default)]
struct ConsolePublisher {
    slot: Mutex<Option<NowPlayingInfo>>,
}

impl NowPlayingPublisher for ConsolePublisher {
    fn publish(&self, info: Option<NowPlayingInfo>) {
        if let Some(info) = &info {
            println!("now playing: {} (rate {})", info.title, info.playback_rate);
        }
        *self.slot.lock().unwrap() = info;
    }

    fn current(&self) -> Option<NowPlayingInfo> {
        self.slot.lock().unwrap().clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let session = PlaybackSession::new(Providers {
        route: Arc::new(ConsoleRoute),
        engine_factory: Arc::new(ConsoleFactory),
        remote: Arc::new(ConsoleRemote),
        now_playing: Arc::new(ConsolePublisher::default()),
        artwork: Arc::new(NoArtwork),
        feedback: Arc::new(NoopFeedback),
    });

    session.activate()?;

    let mut track = PlayableTrack::new(
        Url::parse("https://sverigesradio.se/topsy/direkt/srapi/132.mp3")?,
        "P1",
    );
    track.artist = Some("Sveriges Radio".to_string());

    session.play(track.clone());
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("state: {:?}", session.state());
    println!("is playing P1: {}", session.is_playing(&track));

    session.pause();
    println!("state after pause: {:?}", session.state());

    Ok(())
}
