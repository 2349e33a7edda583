//! The session host: one owned state object per active mini-game.
//!
//! Each room's game lives in a [`GameSession`], an explicit value the
//! engine owns. There are no module-level counters or process-wide
//! singletons; constructing a session is the only way to get one, and
//! `reset` rebuilds it in place.

use std::time::Duration;

use tracing::debug;

use crate::MiniGame;

/// Hosts one mini-game session: routes actions through validation,
/// forwards ticks, and rebuilds state on reset.
pub struct GameSession<G: MiniGame> {
    config: G::Config,
    state: G::State,
}

impl<G: MiniGame> GameSession<G> {
    /// Starts a fresh session with the given config.
    pub fn new(config: G::Config) -> Self {
        let state = G::init(&config);
        Self { config, state }
    }

    /// Starts a fresh session with the shipped configuration.
    pub fn with_defaults() -> Self {
        Self::new(G::Config::default())
    }

    /// Routes a player action: validate, then handle.
    ///
    /// An action that fails validation is dropped as a no-op; the refusal
    /// is logged at debug and produces no events. Game rules that want a
    /// player-visible refusal (an inline "not enough money" message)
    /// model it as an `Event` from `handle_action` instead.
    pub fn act(&mut self, action: G::Action) -> Vec<G::Event> {
        if let Err(reason) = G::validate_action(&self.state, &action) {
            debug!(%reason, "action rejected");
            return Vec::new();
        }
        G::handle_action(&mut self.state, action)
    }

    /// Advances time-driven behavior by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<G::Event> {
        G::tick(&mut self.state, dt)
    }

    /// Whether the session reached a terminal state.
    pub fn is_finished(&self) -> bool {
        G::is_finished(&self.state)
    }

    /// Resets the session to a fresh state under the same config.
    pub fn reset(&mut self) {
        self.state = G::init(&self.config);
        debug!("session reset");
    }

    /// Read access to the session state (status bars, boards, tests).
    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// The config this session was created with.
    pub fn config(&self) -> &G::Config {
        &self.config
    }
}
