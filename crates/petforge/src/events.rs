//! The engine's inbound action and outbound event surfaces.

use petforge_games::{drawing, gacha, matching, puzzle, quiz, reading};
use petforge_room::Room;
use petforge_status::PetStatus;
use petforge_lifecycle::SleepState;

/// A player action aimed at one of the mini-games.
///
/// The variant names the game, so routing never depends on which room is
/// currently displayed; the UI only offers the visible room's actions.
#[derive(Debug, Clone, Copy)]
pub enum GameAction {
    Quiz(quiz::Answer),
    Match(matching::Flip),
    Gacha(gacha::GachaAction),
    Puzzle(puzzle::DropPiece),
    Reading(reading::ReadingAction),
    Drawing(drawing::DrawingAction),
}

/// Something a mini-game reported.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Quiz(quiz::QuizEvent),
    Match(matching::MatchEvent),
    Gacha(gacha::GachaEvent),
    Puzzle(puzzle::PuzzleEvent),
    Reading(reading::ReadingEvent),
    Drawing(drawing::DrawingEvent),
}

/// Everything the presentation layer can observe from the engine.
///
/// Broadcast on the handle's event channel. Slow subscribers may lag and
/// miss events; the channel favors the live screen over history.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Energy moved (already persisted by the time this is seen).
    EnergyChanged { energy: u8 },
    /// The pet fell asleep; the light is off.
    FellAsleep,
    /// The pet woke up; the light is on.
    WokeUp,
    /// Low energy forced the room to the Bedroom. Show the auto-sleep
    /// notice.
    ForcedToBedroom { energy: u8 },
    /// The one-shot low-energy warning fired.
    LowEnergyWarning { energy: u8 },
    /// A navigation request was rejected because the pet is sleeping.
    /// Show the "sleep time" notice.
    NavigationBlocked,
    /// The current room changed (voluntarily or forced).
    RoomChanged { room: Room },
    /// A room's session was reset to a fresh game.
    GameReset { room: Room },
    /// A mini-game reported an outcome.
    Game(GameEvent),
}

/// A point-in-time view of the pet for status bars and debugging.
#[derive(Debug, Clone)]
pub struct AppOverview {
    pub status: PetStatus,
    pub room: Room,
    pub sleep: SleepState,
    pub light_on: bool,
}

impl AppOverview {
    /// Current energy, `0..=100`.
    pub fn energy(&self) -> u8 {
        self.status.energy()
    }
}
