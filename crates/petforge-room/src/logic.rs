//! The `MiniGame` trait — the extension point every room's game implements.
//!
//! This is the single trait a game author writes. The session host calls
//! these methods at the right time; the game just states its rules.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

/// The core trait each mini-game implements.
///
/// Each associated type defines one shape of the game's data:
/// - `Config` — fixed settings (board size, timer duration, costs)
/// - `State` — the full session state (scores, boards, countdowns)
/// - `Action` — what the player can do (answer, flip, spin, drop)
/// - `Event` — what happened, for the presentation layer to react to
///
/// The host calls `init` to create a fresh session, routes player actions
/// through `validate_action` then `handle_action`, and calls `tick` on
/// games with time-driven behavior (countdowns, intervals). Waits are
/// always modeled as state advanced by `tick`, never as blocking sleeps.
pub trait MiniGame: Send + Sync + 'static {
    /// Fixed game settings. `Default` is the shipped configuration.
    type Config: Send + Sync + Clone + Default;

    /// The full session state. Serializable so a host can snapshot or
    /// inspect a running game.
    type State: Send + Sync + Clone + Serialize + DeserializeOwned;

    /// A player action (e.g. "flip card 7", "drop piece p2 at (x, y)").
    type Action: Send + Sync;

    /// An outcome the presentation layer reacts to (e.g. "pair matched",
    /// "perfect score", "insufficient balance").
    type Event: Send + Sync;

    /// Creates a fresh session state. Also the reset path: resetting a
    /// session is exactly re-running `init`.
    fn init(config: &Self::Config) -> Self::State;

    /// Validates an action before processing.
    ///
    /// `Err` means the action is dropped as a no-op (logged at debug,
    /// never an error the player sees). Post-finish rejection policy
    /// lives here too: a finished quiz rejects answers, a frozen match
    /// board rejects flips. Default: accept everything.
    fn validate_action(
        _state: &Self::State,
        _action: &Self::Action,
    ) -> Result<(), String> {
        Ok(())
    }

    /// Processes a validated action. This is where the rules live.
    fn handle_action(state: &mut Self::State, action: Self::Action) -> Vec<Self::Event>;

    /// Advances time-driven behavior by `dt`. Only games with countdowns
    /// or intervals override this. Default: no-op.
    fn tick(_state: &mut Self::State, _dt: Duration) -> Vec<Self::Event> {
        Vec::new()
    }

    /// Returns `true` once the session has reached a terminal state.
    /// Continuous games (gacha, drawing) simply always return `false`.
    fn is_finished(state: &Self::State) -> bool;
}
