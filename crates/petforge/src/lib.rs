//! # Petforge
//!
//! A virtual-pet application core: an energy/sleep lifecycle state
//! machine, a fixed ring of rooms, and six independent mini-game
//! sessions, all driven by one engine task.
//!
//! The host app implements the collaborator traits ([`AlertSink`],
//! [`SoundPlayer`], [`SpeechSynth`], and a
//! [`StatusStore`](petforge_store::StatusStore)), builds a [`PetApp`],
//! spawns it, and talks to it through the [`PetAppHandle`]: commands in,
//! [`AppEvent`]s out.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use petforge::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     petforge::init_tracing();
//!
//!     let (app, handle) = PetAppBuilder::new()
//!         .store(JsonFileStore::new("./data"))
//!         .build()
//!         .await;
//!     tokio::spawn(app.run());
//!
//!     let mut events = handle.subscribe();
//!     handle.request_room_change(Direction::Next).await.ok();
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//! }
//! ```

mod app;
mod error;
mod events;
mod hooks;

pub use app::{DEFAULT_GAME_TICK_PERIOD, PetApp, PetAppBuilder, PetAppHandle};
pub use error::PetforgeError;
pub use events::{AppEvent, AppOverview, GameAction, GameEvent};
pub use hooks::{
    AlertSink, NoopAlerts, NoopSounds, NoopSpeech, SoundCue, SoundPlayer, SpeechSynth,
};

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The one-stop import for host apps.
pub mod prelude {
    pub use crate::{
        AlertSink, AppEvent, AppOverview, GameAction, GameEvent, PetApp, PetAppBuilder,
        PetAppHandle, PetforgeError, SoundCue, SoundPlayer, SpeechSynth,
    };
    pub use petforge_games::{
        drawing::DrawingAction, gacha::GachaAction, matching::Flip, puzzle::DropPiece,
        quiz::Answer, reading::ReadingAction,
    };
    pub use petforge_lifecycle::{LifecycleConfig, SleepState};
    pub use petforge_room::{Direction, Room};
    pub use petforge_status::PetStatus;
    pub use petforge_store::{JsonFileStore, MemoryStore, StatusStore};
}
