//! `PetApp`: the single engine actor that owns all mutable state.
//!
//! The whole core is one Tokio task. User commands arrive on an mpsc
//! channel; the lifecycle ticker and the game ticker interleave on the
//! same `select!` loop. Nothing is shared, so nothing is locked: the
//! snapshot has exactly one writer, and every state transition happens
//! synchronously inside this task in response to either a discrete
//! command or a timer tick.

use std::time::Duration;

use petforge_games::{
    DrawingGame, GachaGame, MatchingGame, PuzzleGame, QuizGame, ReadingGame, gacha, matching,
    quiz, reading,
};
use petforge_lifecycle::{LifecycleConfig, LifecycleController, LifecycleEvent};
use petforge_room::{Direction, GameSession, Room, RoomError, RoomSelector};
use petforge_store::{MemoryStore, StatusStore};
use petforge_tick::TickScheduler;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{info, warn};

use crate::{
    AlertSink, AppEvent, AppOverview, GameAction, GameEvent, NoopAlerts, NoopSounds, NoopSpeech,
    PetforgeError, SoundCue, SoundPlayer, SpeechSynth,
};

/// Command channel depth; beyond this, handle calls apply backpressure.
const COMMAND_CHANNEL_SIZE: usize = 64;

/// Event fan-out depth; a subscriber this far behind starts lagging.
const EVENT_CHANNEL_SIZE: usize = 256;

/// How often timed games (the match countdown, the reading interval)
/// are advanced.
pub const DEFAULT_GAME_TICK_PERIOD: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Commands sent from a [`PetAppHandle`] to the engine task.
enum PetCommand {
    RoomChange {
        direction: Direction,
        reply: oneshot::Sender<Result<Room, RoomError>>,
    },
    SetLight {
        on: bool,
    },
    Game(GameAction),
    ResetGame {
        room: Room,
    },
    Overview {
        reply: oneshot::Sender<AppOverview>,
    },
    Shutdown,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for configuring and creating a [`PetApp`].
///
/// Collaborators default to in-memory / no-op implementations, so the
/// minimal `PetAppBuilder::new().build().await` produces a fully working
/// (if silent and forgetful) pet.
///
/// # Example
///
/// ```rust,no_run
/// use petforge::prelude::*;
///
/// # async fn demo() {
/// let (app, handle) = PetAppBuilder::new()
///     .store(JsonFileStore::new("/tmp/petforge"))
///     .build()
///     .await;
/// tokio::spawn(app.run());
/// handle.request_room_change(Direction::Next).await.ok();
/// # }
/// ```
pub struct PetAppBuilder<S, A, P, V> {
    store: S,
    alerts: A,
    sounds: P,
    speech: V,
    lifecycle_config: LifecycleConfig,
    game_tick_period: Duration,
}

impl PetAppBuilder<MemoryStore, NoopAlerts, NoopSounds, NoopSpeech> {
    /// Creates a builder with default (in-memory, no-op) collaborators.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            alerts: NoopAlerts,
            sounds: NoopSounds,
            speech: NoopSpeech,
            lifecycle_config: LifecycleConfig::default(),
            game_tick_period: DEFAULT_GAME_TICK_PERIOD,
        }
    }
}

impl Default for PetAppBuilder<MemoryStore, NoopAlerts, NoopSounds, NoopSpeech> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, P, V> PetAppBuilder<S, A, P, V> {
    /// Sets the persistence store.
    pub fn store<S2>(self, store: S2) -> PetAppBuilder<S2, A, P, V> {
        PetAppBuilder {
            store,
            alerts: self.alerts,
            sounds: self.sounds,
            speech: self.speech,
            lifecycle_config: self.lifecycle_config,
            game_tick_period: self.game_tick_period,
        }
    }

    /// Sets the alert sink.
    pub fn alerts<A2>(self, alerts: A2) -> PetAppBuilder<S, A2, P, V> {
        PetAppBuilder {
            store: self.store,
            alerts,
            sounds: self.sounds,
            speech: self.speech,
            lifecycle_config: self.lifecycle_config,
            game_tick_period: self.game_tick_period,
        }
    }

    /// Sets the sound player.
    pub fn sounds<P2>(self, sounds: P2) -> PetAppBuilder<S, A, P2, V> {
        PetAppBuilder {
            store: self.store,
            alerts: self.alerts,
            sounds,
            speech: self.speech,
            lifecycle_config: self.lifecycle_config,
            game_tick_period: self.game_tick_period,
        }
    }

    /// Sets the speech synthesizer.
    pub fn speech<V2>(self, speech: V2) -> PetAppBuilder<S, A, P, V2> {
        PetAppBuilder {
            store: self.store,
            alerts: self.alerts,
            sounds: self.sounds,
            speech,
            lifecycle_config: self.lifecycle_config,
            game_tick_period: self.game_tick_period,
        }
    }

    /// Overrides the lifecycle configuration.
    pub fn lifecycle_config(mut self, config: LifecycleConfig) -> Self {
        self.lifecycle_config = config;
        self
    }

    /// Overrides the timed-game tick period.
    pub fn game_tick_period(mut self, period: Duration) -> Self {
        self.game_tick_period = period;
        self
    }
}

impl<S, A, P, V> PetAppBuilder<S, A, P, V>
where
    S: StatusStore,
    A: AlertSink,
    P: SoundPlayer,
    V: SpeechSynth,
{
    /// Loads the snapshot and assembles the engine.
    ///
    /// A failed load is logged and degrades to the first-run defaults;
    /// it never fails the build.
    pub async fn build(self) -> (PetApp<S, A, P, V>, PetAppHandle) {
        let persisted = match self.store.load().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(error = %error, "snapshot load failed, starting from defaults");
                None
            }
        };

        let controller = LifecycleController::new(persisted, self.lifecycle_config);
        let regen_period = controller.config().regen_period;

        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);

        let mut app = PetApp {
            controller,
            selector: RoomSelector::new(),
            quiz: GameSession::with_defaults(),
            matching: GameSession::with_defaults(),
            gacha: GameSession::with_defaults(),
            puzzle: GameSession::with_defaults(),
            reading: GameSession::with_defaults(),
            drawing: GameSession::with_defaults(),
            store: self.store,
            alerts: self.alerts,
            sounds: self.sounds,
            speech: self.speech,
            commands: command_rx,
            events: event_tx.clone(),
            lifecycle_ticker: TickScheduler::new("lifecycle", regen_period),
            game_ticker: TickScheduler::disabled("game"),
            game_tick_period: self.game_tick_period,
        };
        // The starting room (the Library) hosts a timed session.
        app.sync_game_ticker();

        let handle = PetAppHandle {
            commands: command_tx,
            events: event_tx,
        };
        (app, handle)
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Handle to a running [`PetApp`]. Cheap to clone; this is what the
/// presentation layer holds.
#[derive(Clone)]
pub struct PetAppHandle {
    commands: mpsc::Sender<PetCommand>,
    events: broadcast::Sender<AppEvent>,
}

impl PetAppHandle {
    /// Requests a room change. Returns the room actually landed in
    /// (which is the Bedroom whenever energy is low, regardless of
    /// direction), or [`RoomError::PetSleeping`] while the pet sleeps.
    pub async fn request_room_change(
        &self,
        direction: Direction,
    ) -> Result<Room, PetforgeError> {
        let (reply, rx) = oneshot::channel();
        self.send(PetCommand::RoomChange { direction, reply }).await?;
        let result = rx.await.map_err(|_| PetforgeError::EngineClosed)?;
        Ok(result?)
    }

    /// Flips the bedroom light switch: off puts the pet to sleep, on
    /// wakes it, no questions asked either way.
    pub async fn set_light(&self, on: bool) -> Result<(), PetforgeError> {
        self.send(PetCommand::SetLight { on }).await
    }

    /// Sends a mini-game action.
    pub async fn game(&self, action: GameAction) -> Result<(), PetforgeError> {
        self.send(PetCommand::Game(action)).await
    }

    /// Resets a room's game to a fresh session (the retry buttons).
    pub async fn reset_game(&self, room: Room) -> Result<(), PetforgeError> {
        self.send(PetCommand::ResetGame { room }).await
    }

    /// Fetches a point-in-time view of the pet and the current room.
    pub async fn overview(&self) -> Result<AppOverview, PetforgeError> {
        let (reply, rx) = oneshot::channel();
        self.send(PetCommand::Overview { reply }).await?;
        rx.await.map_err(|_| PetforgeError::EngineClosed)
    }

    /// Asks the engine to persist and stop.
    pub async fn shutdown(&self) -> Result<(), PetforgeError> {
        self.send(PetCommand::Shutdown).await
    }

    /// Subscribes to the engine's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    async fn send(&self, command: PetCommand) -> Result<(), PetforgeError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PetforgeError::EngineClosed)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The engine actor. Construct with [`PetAppBuilder`], then hand the
/// value to `tokio::spawn(app.run())`.
pub struct PetApp<S, A, P, V> {
    controller: LifecycleController,
    selector: RoomSelector,
    quiz: GameSession<QuizGame>,
    matching: GameSession<MatchingGame>,
    gacha: GameSession<GachaGame>,
    puzzle: GameSession<PuzzleGame>,
    reading: GameSession<ReadingGame>,
    drawing: GameSession<DrawingGame>,
    store: S,
    alerts: A,
    sounds: P,
    speech: V,
    commands: mpsc::Receiver<PetCommand>,
    events: broadcast::Sender<AppEvent>,
    lifecycle_ticker: TickScheduler,
    game_ticker: TickScheduler,
    game_tick_period: Duration,
}

impl<S, A, P, V> PetApp<S, A, P, V>
where
    S: StatusStore,
    A: AlertSink,
    P: SoundPlayer,
    V: SpeechSynth,
{
    /// Runs the engine until shutdown (or until every handle is dropped).
    pub async fn run(mut self) {
        info!(
            room = %self.selector.current(),
            energy = self.controller.energy(),
            "pet app started"
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(PetCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command).await,
                    }
                }
                _ = self.lifecycle_ticker.wait_for_tick() => {
                    let events = self.controller.on_tick();
                    self.dispatch_lifecycle(events).await;
                }
                tick = self.game_ticker.wait_for_tick() => {
                    self.tick_game(tick.dt);
                }
            }
        }

        // One last durable write on the way out.
        self.persist().await;
        info!("pet app stopped");
    }

    async fn handle_command(&mut self, command: PetCommand) {
        match command {
            PetCommand::RoomChange { direction, reply } => {
                let result = self.change_room(direction);
                let _ = reply.send(result);
            }
            PetCommand::SetLight { on } => {
                let events = self.controller.set_light(on);
                self.dispatch_lifecycle(events).await;
            }
            PetCommand::Game(action) => self.route_game_action(action),
            PetCommand::ResetGame { room } => {
                self.reset_session_for(room);
                self.broadcast(AppEvent::GameReset { room });
            }
            PetCommand::Overview { reply } => {
                let _ = reply.send(self.overview());
            }
            PetCommand::Shutdown => unreachable!("consumed by the run loop"),
        }
    }

    // -- Navigation -------------------------------------------------------

    fn change_room(&mut self, direction: Direction) -> Result<Room, RoomError> {
        let before = self.selector.current();
        let policy = self.controller.navigation_policy();

        match self.selector.request(direction, policy) {
            Ok(room) => {
                if room != before {
                    self.enter_room(room);
                }
                Ok(room)
            }
            Err(err) => {
                // Sleeping: surface the notice with its tone, stay put.
                self.sounds.play(SoundCue::Notif);
                self.broadcast(AppEvent::NavigationBlocked);
                Err(err)
            }
        }
    }

    /// Mount semantics, as the screens always had: entering a room
    /// starts that room's game fresh.
    fn enter_room(&mut self, room: Room) {
        self.reset_session_for(room);
        self.sync_game_ticker();
        self.broadcast(AppEvent::RoomChanged { room });
    }

    fn reset_session_for(&mut self, room: Room) {
        match room {
            Room::Library => {
                self.reading.reset();
                self.speech.stop();
            }
            Room::MathRoom => self.quiz.reset(),
            Room::DrawingRoom => self.drawing.reset(),
            Room::Matching => self.matching.reset(),
            Room::Puzzle => self.puzzle.reset(),
            Room::Gacha => self.gacha.reset(),
            Room::Bedroom => {}
        }
    }

    /// Cancel-before-start: entering a timed room replaces any previous
    /// schedule in place; a duplicate interval cannot exist.
    fn sync_game_ticker(&mut self) {
        if matches!(self.selector.current(), Room::Matching | Room::Library) {
            self.game_ticker.restart(self.game_tick_period);
        } else {
            self.game_ticker.cancel();
        }
    }

    // -- Lifecycle events -------------------------------------------------

    async fn dispatch_lifecycle(&mut self, events: Vec<LifecycleEvent>) {
        for event in events {
            match event {
                LifecycleEvent::EnergyChanged { energy } => {
                    self.persist().await;
                    self.broadcast(AppEvent::EnergyChanged { energy });
                }
                LifecycleEvent::FellAsleep => self.broadcast(AppEvent::FellAsleep),
                LifecycleEvent::WokeUp => self.broadcast(AppEvent::WokeUp),
                LifecycleEvent::AutoSleepTriggered { energy } => {
                    if self.selector.current() != Room::Bedroom {
                        self.selector.force_bedroom();
                        self.enter_room(Room::Bedroom);
                        self.sounds.play(SoundCue::Notif);
                        self.broadcast(AppEvent::ForcedToBedroom { energy });
                    }
                }
                LifecycleEvent::LowEnergyWarning { energy } => {
                    self.alerts.alert(
                        "⚠️ Uh-oh, Low Energy!",
                        "Your energy is down to 20%! Time to take a cozy nap in your Bedroom!",
                    );
                    self.broadcast(AppEvent::LowEnergyWarning { energy });
                }
            }
        }
    }

    /// Saves the snapshot. A failed save is logged and forgotten: the
    /// in-memory state keeps advancing, and the next energy change
    /// carries the same (or newer) data to the store again.
    async fn persist(&self) {
        if let Err(error) = self.store.save(self.controller.status()).await {
            warn!(error = %error, "snapshot save failed; in-memory state unaffected");
        }
    }

    // -- Game routing -----------------------------------------------------

    fn route_game_action(&mut self, action: GameAction) {
        let events: Vec<GameEvent> = match action {
            GameAction::Quiz(a) => {
                self.quiz.act(a).into_iter().map(GameEvent::Quiz).collect()
            }
            GameAction::Match(a) => {
                self.matching.act(a).into_iter().map(GameEvent::Match).collect()
            }
            GameAction::Gacha(a) => {
                self.gacha.act(a).into_iter().map(GameEvent::Gacha).collect()
            }
            GameAction::Puzzle(a) => {
                self.puzzle.act(a).into_iter().map(GameEvent::Puzzle).collect()
            }
            GameAction::Reading(a) => {
                self.reading.act(a).into_iter().map(GameEvent::Reading).collect()
            }
            GameAction::Drawing(a) => {
                self.drawing.act(a).into_iter().map(GameEvent::Drawing).collect()
            }
        };

        for event in events {
            self.dispatch_game_event(event);
        }
    }

    fn tick_game(&mut self, dt: Duration) {
        let events: Vec<GameEvent> = match self.selector.current() {
            Room::Matching => {
                self.matching.tick(dt).into_iter().map(GameEvent::Match).collect()
            }
            Room::Library => {
                self.reading.tick(dt).into_iter().map(GameEvent::Reading).collect()
            }
            _ => Vec::new(),
        };

        for event in events {
            self.dispatch_game_event(event);
        }
    }

    /// Maps a game event to its cosmetic side effects, then broadcasts
    /// it. The side effects are fire-and-forget; game state has already
    /// moved on by the time they run.
    fn dispatch_game_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::Quiz(e) => {
                if matches!(e, quiz::QuizEvent::Finished { perfect: true, .. }) {
                    self.sounds.play(SoundCue::Win);
                }
            }
            GameEvent::Match(e) => match e {
                matching::MatchEvent::CardFlipped { .. } => self.sounds.play(SoundCue::Flip),
                matching::MatchEvent::PairMatched { .. } => self.sounds.play(SoundCue::Match),
                matching::MatchEvent::Won { .. } => self.sounds.play(SoundCue::LevelUp),
                matching::MatchEvent::TimedOut => self.sounds.play(SoundCue::GameOver),
                _ => {}
            },
            GameEvent::Gacha(e) => match e {
                gacha::GachaEvent::Spun { .. } | gacha::GachaEvent::BulkSpun { .. } => {
                    self.sounds.play(SoundCue::Spin)
                }
                gacha::GachaEvent::Jackpot { .. } => self.sounds.play(SoundCue::LevelUp),
                gacha::GachaEvent::RowWin { .. } => self.sounds.play(SoundCue::Match),
                gacha::GachaEvent::InsufficientBalance { required, .. } => {
                    self.alerts.alert(
                        "Not Enough Money",
                        &format!("You need ${required} to spin."),
                    );
                }
            },
            GameEvent::Reading(e) => match e {
                reading::ReadingEvent::Speak { letter } => {
                    self.speech.speak(&letter.to_string())
                }
                reading::ReadingEvent::Paused => self.speech.stop(),
                reading::ReadingEvent::Completed => {}
            },
            GameEvent::Puzzle(_) | GameEvent::Drawing(_) => {}
        }

        self.broadcast(AppEvent::Game(event));
    }

    // -- Plumbing ---------------------------------------------------------

    fn overview(&self) -> AppOverview {
        AppOverview {
            status: self.controller.status().clone(),
            room: self.selector.current(),
            sleep: self.controller.sleep_state(),
            light_on: self.controller.light_on(),
        }
    }

    /// Failure here only means nobody is subscribed, which is fine.
    fn broadcast(&self, event: AppEvent) {
        let _ = self.events.send(event);
    }
}
