//! The room ring: the fixed ordered list of navigable screens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One navigable room. The order is fixed and navigation wraps around,
/// so the list behaves as a ring: Gacha's "next" is the Library.
///
/// Rooms are never created or destroyed; the only navigation state
/// anywhere is which room is current (see
/// [`RoomSelector`](crate::RoomSelector)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    /// Letter-reading trainer.
    Library,
    /// Arithmetic quiz.
    MathRoom,
    /// Free drawing canvas.
    DrawingRoom,
    /// Memory-match board.
    Matching,
    /// Sleep room with the light switch. Forced destination at low energy.
    Bedroom,
    /// Jigsaw puzzle board.
    Puzzle,
    /// Slot-grid gacha.
    Gacha,
}

impl Room {
    /// Every room in ring order.
    pub const ALL: [Room; 7] = [
        Room::Library,
        Room::MathRoom,
        Room::DrawingRoom,
        Room::Matching,
        Room::Bedroom,
        Room::Puzzle,
        Room::Gacha,
    ];

    /// Number of rooms in the ring.
    pub const COUNT: usize = Self::ALL.len();

    /// This room's position in the ring.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|room| room == self)
            .expect("every room is in ALL")
    }

    /// The room at `index`, wrapping modulo the ring length.
    pub fn from_index(index: usize) -> Room {
        Self::ALL[index % Self::COUNT]
    }

    /// The next room in ring order.
    pub fn next(&self) -> Room {
        Self::from_index(self.index() + 1)
    }

    /// The previous room in ring order.
    pub fn prev(&self) -> Room {
        Self::from_index(self.index() + Self::COUNT - 1)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Room::Library => "Library",
            Room::MathRoom => "Math Room",
            Room::DrawingRoom => "Drawing Room",
            Room::Matching => "Matching",
            Room::Bedroom => "Bedroom",
            Room::Puzzle => "Puzzle",
            Room::Gacha => "Gacha",
        };
        write!(f, "{name}")
    }
}

/// Which way a navigation request points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the previous room in ring order.
    Prev,
    /// Toward the next room in ring order.
    Next,
}
