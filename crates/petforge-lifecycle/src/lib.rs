//! Pet lifecycle management for Petforge.
//!
//! This crate owns the energy simulation:
//!
//! 1. **Sleep state** — the two-state machine ([`SleepState`]) with its
//!    two automatic transitions (drain to 0, refill to 100) and the
//!    manual light-switch override.
//! 2. **Controller** — [`LifecycleController`] advances energy per tick
//!    and reports [`LifecycleEvent`]s for the engine to act on.
//! 3. **Navigation guard** — [`NavPolicy`] tells the room layer whether
//!    movement is blocked, forced to the Bedroom, or free.
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine (above)     ← ticks the controller, dispatches its events
//!     ↕
//! Lifecycle (this crate)  ← owns energy and the sleep state machine
//!     ↕
//! Status (below)     ← provides the PetStatus snapshot being simulated
//! ```

mod config;
mod controller;
mod state;

pub use config::LifecycleConfig;
pub use controller::{LifecycleController, LifecycleEvent};
pub use state::{NavPolicy, SleepState};
