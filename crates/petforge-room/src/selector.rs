//! Room selector: the one piece of navigation state.

use petforge_lifecycle::NavPolicy;
use tracing::{debug, info};

use crate::{Direction, Room, RoomError};

/// Tracks the current room and applies navigation requests under the
/// lifecycle's policy.
///
/// The selector never looks at energy or sleep state itself; the caller
/// fetches a [`NavPolicy`] from the lifecycle controller and passes it
/// in, keeping the precedence rules in exactly one place.
#[derive(Debug, Clone)]
pub struct RoomSelector {
    current: Room,
}

impl RoomSelector {
    /// Starts in the first room of the ring (the Library).
    pub fn new() -> Self {
        Self {
            current: Room::from_index(0),
        }
    }

    /// The current room.
    pub fn current(&self) -> Room {
        self.current
    }

    /// Applies a navigation request.
    ///
    /// - `Blocked`: the request is rejected, the room is unchanged, and
    ///   the caller surfaces the "character is sleeping" notice.
    /// - `ForceBedroom`: the destination is the Bedroom regardless of the
    ///   requested direction.
    /// - `Free`: step one room in the requested direction, wrapping.
    pub fn request(
        &mut self,
        direction: Direction,
        policy: NavPolicy,
    ) -> Result<Room, RoomError> {
        match policy {
            NavPolicy::Blocked => {
                debug!(room = %self.current, ?direction, "navigation rejected, pet sleeping");
                Err(RoomError::PetSleeping)
            }
            NavPolicy::ForceBedroom => {
                self.go_to(Room::Bedroom);
                Ok(self.current)
            }
            NavPolicy::Free => {
                let next = match direction {
                    Direction::Prev => self.current.prev(),
                    Direction::Next => self.current.next(),
                };
                self.go_to(next);
                Ok(self.current)
            }
        }
    }

    /// Forces the current room to the Bedroom (the auto-sleep rule).
    /// Returns `true` if this actually changed rooms.
    pub fn force_bedroom(&mut self) -> bool {
        if self.current == Room::Bedroom {
            return false;
        }
        self.go_to(Room::Bedroom);
        true
    }

    fn go_to(&mut self, room: Room) {
        if self.current != room {
            info!(from = %self.current, to = %room, "room changed");
            self.current = room;
        }
    }
}

impl Default for RoomSelector {
    fn default() -> Self {
        Self::new()
    }
}
