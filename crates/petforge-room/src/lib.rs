//! Room navigation and mini-game hosting for Petforge.
//!
//! # Key types
//!
//! - [`Room`] — the fixed ordered ring of navigable screens
//! - [`RoomSelector`] — the one piece of navigation state, guarded by
//!   the lifecycle's [`NavPolicy`](petforge_lifecycle::NavPolicy)
//! - [`MiniGame`] — the trait each room's game implements
//! - [`GameSession`] — the owned per-game session host
//! - [`RoomError`] — what navigation can refuse

mod error;
mod logic;
mod rooms;
mod selector;
mod session;

pub use error::RoomError;
pub use logic::MiniGame;
pub use rooms::{Direction, Room};
pub use selector::RoomSelector;
pub use session::GameSession;
